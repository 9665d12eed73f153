//! Listing form - input widgets and the Input Record they produce
//!
//! Field names, labels, bounds and defaults are fixed. Submitted numbers are
//! clamped into bounds the same way the browser widget clamps them.

use serde::Deserialize;

use crate::schema::InputRecord;

// ============================================================================
// FIELD TABLE
// ============================================================================

/// Bounded integer input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericField {
    pub key: &'static str,
    pub label: &'static str,
    pub min: i64,
    pub max: i64,
    pub default: i64,
}

impl NumericField {
    pub fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.min, self.max)
    }

    /// Parse a submitted value; blank or garbage falls back to the default
    pub fn parse(&self, raw: Option<&str>) -> i64 {
        raw.map(str::trim)
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .map(|v| self.clamp(v.round() as i64))
            .unwrap_or(self.default)
    }
}

/// Yes/no checkbox feeding a `<key>_yes` indicator column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleField {
    pub key: &'static str,
    pub column: &'static str,
    pub label: &'static str,
}

pub const NUMERIC_FIELDS: [NumericField; 5] = [
    NumericField { key: "superficie", label: "Superficie (m²)", min: 1000, max: 10500, default: 1000 },
    NumericField { key: "chambre", label: "Nombre de chambres", min: 1, max: 5, default: 4 },
    NumericField { key: "salle_de_pain", label: "Nombre de salles de bain", min: 0, max: 10, default: 1 },
    NumericField { key: "etage", label: "Nombre d'étages", min: 0, max: 5, default: 1 },
    NumericField { key: "stationnement", label: "Places de stationnement", min: 0, max: 10, default: 1 },
];

pub const TOGGLE_FIELDS: [ToggleField; 6] = [
    ToggleField { key: "route_principale", column: "route_principale_yes", label: "Route principale à proximité" },
    ToggleField { key: "chambre_invite", column: "chambre_invite_yes", label: "Chambre d'invité" },
    ToggleField { key: "sous_sol", column: "sous_sol_yes", label: "Sous-sol" },
    ToggleField { key: "chauffe_eau", column: "chauffe_eau_yes", label: "Chauffe-eau" },
    ToggleField { key: "climatisation", column: "climatisation_yes", label: "Climatisation" },
    ToggleField { key: "zone_privilegie", column: "zone_privilegie_yes", label: "Zone privilégiée" },
];

pub const FURNISHING_KEY: &str = "meuble";
pub const FURNISHING_LABEL: &str = "Meublé";
pub const SEMI_FURNISHED_COLUMN: &str = "meuble_semi-furnished";
pub const UNFURNISHED_COLUMN: &str = "meuble_unfurnished";

// ============================================================================
// FURNISHING
// ============================================================================

/// Three-way furnishing choice.
///
/// Dummy encoded against the `Furnished` reference level: it has no column
/// of its own and shows up as both indicators at zero. The trained model
/// assumes this exact reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Furnishing {
    #[default]
    Furnished,
    SemiFurnished,
    Unfurnished,
}

impl Furnishing {
    pub const ALL: [Furnishing; 3] = [
        Furnishing::Furnished,
        Furnishing::SemiFurnished,
        Furnishing::Unfurnished,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Furnishing::Furnished => "furnished",
            Furnishing::SemiFurnished => "semi-furnished",
            Furnishing::Unfurnished => "unfurnished",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == raw.trim())
    }

    /// `(meuble_semi-furnished, meuble_unfurnished)`
    pub fn indicators(&self) -> (f64, f64) {
        match self {
            Furnishing::Furnished => (0.0, 0.0),
            Furnishing::SemiFurnished => (1.0, 0.0),
            Furnishing::Unfurnished => (0.0, 1.0),
        }
    }
}

// ============================================================================
// FORM
// ============================================================================

/// Raw urlencoded submission. Unchecked checkboxes are simply absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingForm {
    pub superficie: Option<String>,
    pub chambre: Option<String>,
    pub salle_de_pain: Option<String>,
    pub etage: Option<String>,
    pub stationnement: Option<String>,
    pub route_principale: Option<String>,
    pub chambre_invite: Option<String>,
    pub sous_sol: Option<String>,
    pub chauffe_eau: Option<String>,
    pub climatisation: Option<String>,
    pub zone_privilegie: Option<String>,
    pub meuble: Option<String>,
}

impl ListingForm {
    /// Numeric values in [`NUMERIC_FIELDS`] order
    fn raw_numbers(&self) -> [Option<&str>; 5] {
        [
            self.superficie.as_deref(),
            self.chambre.as_deref(),
            self.salle_de_pain.as_deref(),
            self.etage.as_deref(),
            self.stationnement.as_deref(),
        ]
    }

    /// Checkbox states in [`TOGGLE_FIELDS`] order
    fn raw_toggles(&self) -> [bool; 6] {
        [
            self.route_principale.is_some(),
            self.chambre_invite.is_some(),
            self.sous_sol.is_some(),
            self.chauffe_eau.is_some(),
            self.climatisation.is_some(),
            self.zone_privilegie.is_some(),
        ]
    }
}

/// Widget state after clamping, also used to re-fill the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub numbers: [i64; 5],
    pub toggles: [bool; 6],
    pub furnishing: Furnishing,
}

impl Default for Listing {
    fn default() -> Self {
        Self {
            numbers: NUMERIC_FIELDS.map(|f| f.default),
            toggles: [false; 6],
            furnishing: Furnishing::default(),
        }
    }
}

impl From<&ListingForm> for Listing {
    fn from(form: &ListingForm) -> Self {
        let raw = form.raw_numbers();
        let mut numbers = [0i64; 5];
        for (i, field) in NUMERIC_FIELDS.iter().enumerate() {
            numbers[i] = field.parse(raw[i]);
        }

        Self {
            numbers,
            toggles: form.raw_toggles(),
            furnishing: form
                .meuble
                .as_deref()
                .and_then(Furnishing::parse)
                .unwrap_or_default(),
        }
    }
}

impl Listing {
    /// Build the Input Record in widget order
    pub fn to_record(&self) -> InputRecord {
        let mut record = InputRecord::new();

        for (field, value) in NUMERIC_FIELDS.iter().zip(self.numbers) {
            record.set(field.key, value as f64);
        }
        for (field, checked) in TOGGLE_FIELDS.iter().zip(self.toggles) {
            record.set(field.column, if checked { 1.0 } else { 0.0 });
        }

        let (semi, unfurnished) = self.furnishing.indicators();
        record.set(SEMI_FURNISHED_COLUMN, semi);
        record.set(UNFURNISHED_COLUMN, unfurnished);

        record
    }
}
