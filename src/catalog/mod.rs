// Static catalogs: event definitions, ad platforms, and campaign purposes.
//
// These are the inputs the engine evaluates. None of them are mutated by the
// engine; they're loaded once (or built in) and passed around by reference.

pub mod events;
pub mod platforms;
pub mod purposes;
