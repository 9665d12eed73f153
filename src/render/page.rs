//! Predictor page
//!
//! The page is rebuilt from scratch on every request: header, sidebar, the
//! listing form (re-filled with the last submitted values), the outcome of
//! the interaction if there is one, and the footer.

use crate::listing::{
    Furnishing, Listing, FURNISHING_KEY, FURNISHING_LABEL, NUMERIC_FIELDS, TOGGLE_FIELDS,
};
use crate::model::PredictionError;
use crate::predict::PredictionOutcome;

use super::{escape_html, format_price, render_importance_chart};

/// Where a single interaction stands when the page is rendered
#[derive(Debug, Clone, Copy)]
pub enum Interaction<'a> {
    /// Form shown, nothing submitted yet
    AwaitingInput,
    /// Form submitted and the prediction attempted
    Rendered(&'a Result<PredictionOutcome, PredictionError>),
}

const PAGE_TITLE: &str = "Prédicteur la prix maison - Youssouf";

const STYLE: &str = r#"
body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; margin: 0; background: #ffffff; color: #262730; }
.layout { display: flex; min-height: 100vh; }
.sidebar { width: 300px; background: #f0f2f6; padding: 2rem 1.5rem; }
.main { flex: 1; padding: 2rem 4rem; }
.main-header { background: linear-gradient(135deg, #91BDF2 0%, #91BDF2 100%); padding: 2.2rem; border-radius: 50px; margin-bottom: 2rem; text-align: center; box-shadow: 0 20px 50px rgba(0,0,0,0.1); }
.friendly-info { background: #e3f2fd; padding: 2rem; border-radius: 15px; border-left: 5px solid #2196F3; margin: 1.5rem 0; }
.encouragement { background: linear-gradient(135deg, #fff3e0, #ffecb3); padding: 1.5rem; border-radius: 15px; margin: 1rem 0; border-left: 5px solid #ff9800; }
.form-card { border: 1px solid #e6e9ef; border-radius: 10px; padding: 1.5rem; }
.field { margin-bottom: 1rem; }
.field label { display: block; font-size: 14px; margin-bottom: 0.3rem; }
.field input[type=number], .field select { width: 100%; padding: 0.5rem; border: 1px solid #d0d4dc; border-radius: 6px; }
.check { margin-bottom: 0.6rem; }
.submit { background: #ff4b4b; color: #fff; border: none; border-radius: 8px; padding: 0.6rem 1.4rem; font-size: 15px; cursor: pointer; }
.alert { padding: 1rem 1.2rem; border-radius: 8px; margin: 1.5rem 0; }
.alert-success { background: #dff5e3; color: #177233; }
.alert-error { background: #ffe3e3; color: #9c1c1c; }
.footer { text-align: center; padding: 2.5rem; background: linear-gradient(135deg, #f8f9fa 0%, #e9ecef 100%); border-radius: 20px; margin-top: 2rem; box-shadow: 0 4px 6px rgba(0,0,0,0.1); }
"#;

const HEADER_HTML: &str = r#"
<div class="main-header">
    <h1>🏦 Prédicteur le prix immobilier</h1>
    <p style="font-size:20px;">Développé par - <strong>Youssouf</strong> Assistant Intelligent</p>
</div>"#;

const SIDEBAR_HTML: &str = r#"
<aside class="sidebar">
    <h2>🤖 À propos de votre assistant</h2>
    <div class="friendly-info">
        <h4>Comment je fonctionne ?</h4>
        <p>• J'utilise un modèle d'IA entraîné sur des milliers de cas</p>
        <p>• Ma précision est d'environ 84%</p>
        <p>• Je respecte votre vie privée</p>
    </div>
    <h2>💡 Rappel important</h2>
    <div class="encouragement">
        <p><strong>Gardez en tête :</strong></p>
        <p>✨ Je suis un outil d'aide, pas un agent de immobilier</p>
    </div>
</aside>"#;

const FOOTER_HTML: &str = r#"
<hr>
<div class="footer">
    <h4 style="color: #495057; margin-bottom: 1rem;">🏦 Votre Assistant Intelligente</h4>
    <p style="font-size: 1em; color: #6c757d; margin-bottom: 0.5rem;">
        Créé avec passion par <strong>Youssouf</strong> pour vous accompagner dans votre parcours
    </p>
    <p style="font-size: 0.9em; color: #6c757d; margin-bottom: 1rem;">
        Version 2024 - Mis à jour régulièrement
    </p>
    <div style="border-top: 1px solid #dee2e6; padding-top: 1rem;">
        <p style="font-size: 0.85em; color: #6c757d; font-style: italic;">
            ⚠️ Rappel important : Cet outil d'aide à la décision complète mais ne remplace jamais
            l'expertise de votre agent
        </p>
    </div>
</div>"#;

pub fn render_page(listing: &Listing, interaction: Interaction<'_>) -> String {
    let outcome_html = match interaction {
        Interaction::AwaitingInput => String::new(),
        Interaction::Rendered(Ok(outcome)) => render_success(outcome),
        Interaction::Rendered(Err(e)) => render_failure(e),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="fr">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{PAGE_TITLE}</title>
    <link rel="icon" href="data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'><text y='.9em' font-size='90'>🏦</text></svg>">
    <style>{STYLE}</style>
</head>
<body>
<div class="layout">
{SIDEBAR_HTML}
<main class="main">
{HEADER_HTML}
<h2 style="color:#343a40;text-align:center;margin-bottom:25px">📋 Informations du clients</h2>
{form}
{outcome_html}
{FOOTER_HTML}
</main>
</div>
</body>
</html>"#,
        form = render_form(listing),
    )
}

fn render_form(listing: &Listing) -> String {
    let mut fields = String::new();

    for (field, value) in NUMERIC_FIELDS.iter().zip(listing.numbers) {
        fields.push_str(&format!(
            r#"
    <div class="field">
        <label for="{key}">{label}</label>
        <input type="number" id="{key}" name="{key}" min="{min}" max="{max}" step="1" value="{value}" required>
    </div>"#,
            key = field.key,
            label = escape_html(field.label),
            min = field.min,
            max = field.max,
        ));
    }

    for (field, checked) in TOGGLE_FIELDS.iter().zip(listing.toggles) {
        fields.push_str(&format!(
            r#"
    <div class="check">
        <label><input type="checkbox" name="{key}"{checked}> {label}</label>
    </div>"#,
            key = field.key,
            label = escape_html(field.label),
            checked = if checked { " checked" } else { "" },
        ));
    }

    let options: String = Furnishing::ALL
        .iter()
        .map(|f| {
            format!(
                r#"<option value="{v}"{selected}>{v}</option>"#,
                v = f.as_str(),
                selected = if *f == listing.furnishing { " selected" } else { "" },
            )
        })
        .collect();

    format!(
        r#"<form class="form-card" method="post" action="/predict">{fields}
    <div class="field">
        <label for="{FURNISHING_KEY}">{FURNISHING_LABEL}</label>
        <select id="{FURNISHING_KEY}" name="{FURNISHING_KEY}">{options}</select>
    </div>
    <button type="submit" class="submit">Prédire le prix</button>
</form>"#
    )
}

fn render_success(outcome: &PredictionOutcome) -> String {
    format!(
        r#"<div class="alert alert-success">🏷️ Prix prédit : {price} (monnaie locale)</div>
<h3>Importance des variables</h3>
{chart}"#,
        price = format_price(outcome.price),
        chart = render_importance_chart(&outcome.importances),
    )
}

fn render_failure(error: &PredictionError) -> String {
    format!(
        r#"<div class="alert alert-error">Erreur lors de la prédiction : {}</div>"#,
        escape_html(&error.to_string())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predict::FeatureImportance;

    fn outcome() -> PredictionOutcome {
        PredictionOutcome {
            price: 4_725_000.4,
            importances: vec![FeatureImportance {
                feature: "superficie".to_string(),
                score: 0.42,
            }],
            inference_time_us: 12,
        }
    }

    #[test]
    fn test_awaiting_input_has_form_only() {
        let html = render_page(&Listing::default(), Interaction::AwaitingInput);
        assert!(html.contains(r#"action="/predict""#));
        assert!(html.contains("Prédire le prix"));
        assert!(!html.contains("Prix prédit"));
        assert!(!html.contains("<svg class=\"importance-chart\""));
    }

    #[test]
    fn test_form_shows_bounds_and_defaults() {
        let html = render_page(&Listing::default(), Interaction::AwaitingInput);
        assert!(html.contains(
            r#"name="superficie" min="1000" max="10500" step="1" value="1000""#
        ));
        assert!(html.contains(r#"name="chambre" min="1" max="5" step="1" value="4""#));
        assert!(html.contains(r#"<option value="furnished" selected>"#));
    }

    #[test]
    fn test_form_refills_submission() {
        let listing = Listing {
            numbers: [5000, 3, 1, 2, 1],
            toggles: [false, false, true, false, false, false],
            furnishing: Furnishing::SemiFurnished,
        };
        let html = render_page(&listing, Interaction::AwaitingInput);
        assert!(html.contains(r#"value="5000""#));
        assert!(html.contains(r#"name="sous_sol" checked"#));
        assert!(html.contains(r#"<option value="semi-furnished" selected>"#));
    }

    #[test]
    fn test_success_renders_price_and_chart() {
        let result = Ok(outcome());
        let html = render_page(&Listing::default(), Interaction::Rendered(&result));
        assert!(html.contains("Prix prédit : 4,725,000 (monnaie locale)"));
        assert!(html.contains("Importance des variables</h3>"));
        assert!(html.contains("<svg class=\"importance-chart\""));
    }

    #[test]
    fn test_failure_renders_message_without_chart() {
        let result = Err(PredictionError::NoImportances("model".to_string()));
        let html = render_page(&Listing::default(), Interaction::Rendered(&result));
        assert!(html.contains(
            "Erreur lors de la prédiction : step &#39;model&#39; does not expose feature importances"
        ));
        assert!(!html.contains("<svg class=\"importance-chart\""));
        assert!(!html.contains("Prix prédit"));
    }
}
