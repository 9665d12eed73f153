//! Artifact Loader
//!
//! Reads the trained pipeline and the feature list from local storage.
//!
//! Initialization contract: [`Artifacts::load`] is called exactly once, by
//! `main`, before the listener is bound. On success the result is wrapped in
//! an `Arc` inside [`crate::AppState`] and shared read-only by every request
//! for the rest of the process. On failure the process logs the message and
//! exits; there is no retry and no fallback model.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::model::Pipeline;
use crate::schema::FeatureSchema;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    /// Required file absent
    #[error("Erreur: Fichier manquant - {}", path.display())]
    Missing { path: PathBuf },

    /// File present but unreadable or undeserializable
    #[error("Erreur lors de chargement :{}: {reason}", path.display())]
    Load { path: PathBuf, reason: String },
}

// ============================================================================
// ARTIFACTS
// ============================================================================

/// Where and when the artifacts were loaded
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactMetadata {
    pub model_path: PathBuf,
    pub features_path: PathBuf,
    pub feature_count: usize,
    pub layout_hash: u32,
    pub loaded_at: DateTime<Utc>,
}

/// The trained model and the schema it expects
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub model: Pipeline,
    pub schema: FeatureSchema,
    pub metadata: ArtifactMetadata,
}

impl Artifacts {
    /// Load both artifacts, model first. The first failure wins.
    pub fn load(model_path: &Path, features_path: &Path) -> Result<Self, ArtifactError> {
        tracing::info!("Loading model from: {}", model_path.display());
        let model: Pipeline = read_json(model_path)?;

        tracing::info!("Loading feature list from: {}", features_path.display());
        let schema: FeatureSchema = read_json(features_path)?;

        let metadata = ArtifactMetadata {
            model_path: model_path.to_path_buf(),
            features_path: features_path.to_path_buf(),
            feature_count: schema.len(),
            layout_hash: schema.layout_hash(),
            loaded_at: Utc::now(),
        };

        tracing::info!(
            "Artifacts loaded: {} pipeline steps, {} features (layout {:08x})",
            model.steps.len(),
            metadata.feature_count,
            metadata.layout_hash
        );

        Ok(Self {
            model,
            schema,
            metadata,
        })
    }

    /// Build from in-memory parts, bypassing the filesystem
    pub fn from_parts(model: Pipeline, schema: FeatureSchema) -> Self {
        let metadata = ArtifactMetadata {
            model_path: PathBuf::from("<memory>"),
            features_path: PathBuf::from("<memory>"),
            feature_count: schema.len(),
            layout_hash: schema.layout_hash(),
            loaded_at: Utc::now(),
        };

        Self {
            model,
            schema,
            metadata,
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ArtifactError::Missing {
            path: path.to_path_buf(),
        },
        _ => ArtifactError::Load {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    })?;

    serde_json::from_slice(&bytes).map_err(|e| ArtifactError::Load {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const MODEL: &str = r#"{"steps": [{"name": "model", "kind": "linear", "coef": [1.0, 2.0], "intercept": 0.5}]}"#;
    const FEATURES: &str = r#"["superficie", "chambre"]"#;

    fn write(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_load_success() {
        let dir = TempDir::new().unwrap();
        let model = write(&dir, "best_model.json", MODEL);
        let features = write(&dir, "features.json", FEATURES);

        let artifacts = Artifacts::load(&model, &features).unwrap();
        assert_eq!(artifacts.schema.len(), 2);
        assert_eq!(artifacts.metadata.feature_count, 2);
        assert_eq!(artifacts.metadata.layout_hash, artifacts.schema.layout_hash());
        assert_eq!(artifacts.model.predict(&[1.0, 1.0]).unwrap(), 3.5);
    }

    #[test]
    fn test_missing_model() {
        let dir = TempDir::new().unwrap();
        let features = write(&dir, "features.json", FEATURES);

        let err = Artifacts::load(&dir.path().join("best_model.json"), &features).unwrap_err();
        assert!(matches!(err, ArtifactError::Missing { .. }));
        assert!(err.to_string().starts_with("Erreur: Fichier manquant - "));
    }

    #[test]
    fn test_missing_features() {
        let dir = TempDir::new().unwrap();
        let model = write(&dir, "best_model.json", MODEL);

        let err = Artifacts::load(&model, &dir.path().join("features.json")).unwrap_err();
        match err {
            ArtifactError::Missing { path } => assert!(path.ends_with("features.json")),
            other => panic!("expected Missing, got {other:?}"),
        }
    }

    #[test]
    fn test_corrupt_model() {
        let dir = TempDir::new().unwrap();
        let model = write(&dir, "best_model.json", "\u{80}not json");
        let features = write(&dir, "features.json", FEATURES);

        let err = Artifacts::load(&model, &features).unwrap_err();
        assert!(matches!(err, ArtifactError::Load { .. }));
        assert!(err.to_string().starts_with("Erreur lors de chargement :"));
    }

    #[test]
    fn test_incompatible_feature_list() {
        let dir = TempDir::new().unwrap();
        let model = write(&dir, "best_model.json", MODEL);
        let features = write(&dir, "features.json", r#"{"names": ["a"]}"#);

        let err = Artifacts::load(&model, &features).unwrap_err();
        assert!(matches!(err, ArtifactError::Load { .. }));
    }

    #[test]
    fn test_unknown_step_kind_is_load_failure() {
        let dir = TempDir::new().unwrap();
        let model = write(
            &dir,
            "best_model.json",
            r#"{"steps": [{"name": "model", "kind": "svm"}]}"#,
        );
        let features = write(&dir, "features.json", FEATURES);

        assert!(matches!(
            Artifacts::load(&model, &features),
            Err(ArtifactError::Load { .. })
        ));
    }

    #[test]
    fn test_directory_is_load_failure() {
        let dir = TempDir::new().unwrap();
        let features = write(&dir, "features.json", FEATURES);

        // Reading a directory fails with something other than NotFound
        let err = Artifacts::load(dir.path(), &features).unwrap_err();
        assert!(matches!(err, ArtifactError::Load { .. }));
    }

    #[test]
    fn test_demo_artifacts_parse() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("demo");
        let artifacts =
            Artifacts::load(&root.join("best_model.json"), &root.join("features.json")).unwrap();
        assert_eq!(artifacts.schema.len(), 13);
        assert!(artifacts.model.feature_importances().is_ok());
    }
}
