//! Static page content.
//!
//! The home page carries one tab group of growing guides. The copy lives here
//! rather than in templates so the tab state machine can render it.

use loam_core::{Tab, TabError, TabGroup, TabSet};

/// Identifier of the guides tab group (also its query parameter name).
pub const GUIDES_GROUP: &str = "guides";

/// Build the tab groups shown on the home page, first tab active.
///
/// # Errors
///
/// Returns an error if a group is empty or repeats a tab id.
pub fn home_tabs() -> Result<TabSet, TabError> {
    let guides = TabGroup::new(
        GUIDES_GROUP,
        vec![
            Tab::new(
                "rates",
                "Application rates",
                "Work 1 lb into every 10 sq ft of bed before planting, then side-dress \
                 heavy feeders with half that again at flowering.",
            ),
            Tab::new(
                "testing",
                "Soil testing",
                "Test in early spring. Aim for pH 6.2 to 6.8; add the Compost Catalyst \
                 when organic matter reads under 4%.",
            ),
            Tab::new(
                "delivery",
                "Delivery",
                "Bags ship within two business days. Landscape totes are delivered on a \
                 pallet and need a clear drop zone.",
            ),
        ],
    )?;

    Ok(TabSet::new(vec![guides]))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_home_tabs_start_on_rates() {
        let tabs = home_tabs().unwrap();
        let guides = tabs.group(GUIDES_GROUP).unwrap();
        assert_eq!(guides.tabs().len(), 3);
        assert!(guides.is_active("rates"));
    }
}
