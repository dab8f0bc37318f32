// Problematic platforms: selected platforms that no purpose can satisfy.
//
// A platform is problematic when at least one purpose runs on it and every
// purpose that runs on it reported an explicit failure. Purposes that don't
// define the platform are left out of the check entirely. This is only a
// remediation hint ("remove this platform or collect more data"); it never
// changes validation results.

use serde::{Deserialize, Serialize};

use crate::catalog::platforms::Platform;
use crate::catalog::purposes::PurposeCatalog;

use super::validation::ValidationResults;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblematicPlatform {
    pub platform: Platform,
    /// Display name taken from the first purpose (catalog order) that
    /// defines the platform.
    pub label: String,
    /// Smallest minimum across the purposes that define the platform, i.e.
    /// the least data that would unlock at least one purpose.
    pub min_threshold: u64,
}

/// Find the selected platforms that fail every purpose defining them.
///
/// Returned in selection order, each platform at most once.
pub fn find_problematic_platforms(
    selected_platforms: &[Platform],
    validation_results: &ValidationResults,
    purposes: &PurposeCatalog,
) -> Vec<ProblematicPlatform> {
    let mut problematic: Vec<ProblematicPlatform> = Vec::new();

    for &platform in selected_platforms {
        if problematic.iter().any(|p| p.platform == platform) {
            continue;
        }

        let defining: Vec<_> = purposes
            .iter()
            .filter_map(|p| p.requirement(platform).map(|req| (p, req)))
            .collect();

        let Some((_, first_req)) = defining.first() else {
            continue;
        };

        // A missing result is not an explicit failure.
        let fails_everywhere = defining.iter().all(|(p, _)| {
            validation_results
                .get(&p.id)
                .and_then(|r| r.status(platform))
                == Some(false)
        });

        if fails_everywhere {
            let min_threshold = defining
                .iter()
                .map(|(_, req)| req.min_events)
                .min()
                .unwrap_or(first_req.min_events);
            problematic.push(ProblematicPlatform {
                platform,
                label: first_req.display_name.clone(),
                min_threshold,
            });
        }
    }

    problematic
}
