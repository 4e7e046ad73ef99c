use std::collections::HashMap;
use std::sync::LazyLock;

/// Source label of the synthetic aggregate that covers every cause.
pub const ALL_CAUSES: &str = "ALL CAUSES";
/// Display name of [`ALL_CAUSES`].
pub const ALL_CAUSES_PT: &str = "Todas as causas";

static CONTINENTS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("Americas", "Américas"),
        ("Africa", "África"),
        ("Western Pacific", "Pacífico Ocidental"),
        ("Europe", "Europa"),
        ("South-East Asia", "Sudeste Asiático"),
        ("Eastern Mediterranean", "Mediterrâneo Oriental"),
    ])
});

static CAUSES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        (ALL_CAUSES, ALL_CAUSES_PT),
        ("Trachea, bronchus, lung cancers", "Câncer"),
        ("Chronic obstructive pulmonary disease", "Obstrução da respiração"),
        ("Acute lower respiratory infections", "Infecções respiratórias"),
        ("Stroke", "AVC"),
        ("Ischaemic heart disease", "Doença cardíaca isquêmica"),
    ])
});

/// Localized continent name; unknown labels pass through.
pub fn continent(label: &str) -> String {
    CONTINENTS.get(label).copied().unwrap_or(label).to_string()
}

/// Localized cause name; unknown labels pass through.
pub fn cause(label: &str) -> String {
    CAUSES.get(label).copied().unwrap_or(label).to_string()
}

/// Whether a cause label (raw or localized) denotes the all-causes aggregate.
pub fn is_all_causes(label: &str) -> bool {
    label == ALL_CAUSES || label == ALL_CAUSES_PT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels_are_translated() {
        assert_eq!(continent("Western Pacific"), "Pacífico Ocidental");
        assert_eq!(cause("Stroke"), "AVC");
        assert_eq!(cause(ALL_CAUSES), ALL_CAUSES_PT);
    }

    #[test]
    fn test_unknown_labels_pass_through() {
        assert_eq!(continent("Antarctica"), "Antarctica");
        assert_eq!(cause("Asthma"), "Asthma");
        assert_eq!(cause(""), "");
    }

    #[test]
    fn test_all_causes_matches_both_spellings() {
        assert!(is_all_causes("ALL CAUSES"));
        assert!(is_all_causes("Todas as causas"));
        assert!(!is_all_causes("AVC"));
    }
}
