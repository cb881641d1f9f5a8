//! Per-creature annotation store: nicknames and about-info overrides.
//!
//! Two keyed tables with upsert semantics, mirrored from the original
//! reference server. The store is an injected trait rather than a
//! process-wide singleton, so callers pick memory- or file-backed storage.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{AnnotationError, AnnotationResult};

const MAX_HEIGHT: f64 = 1000.0;
const MAX_WEIGHT: f64 = 10_000.0;
const MAX_DESCRIPTION_LEN: usize = 500;
const MAX_NICKNAME_LEN: usize = 100;

/// User-supplied overrides for a creature's descriptive fields.
///
/// Height and weight are numeric; absent fields fall through to the values
/// from the data API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AboutInfo {
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub description: Option<String>,
}

impl AboutInfo {
    pub fn is_empty(&self) -> bool {
        self.height.is_none() && self.weight.is_none() && self.description.is_none()
    }

    /// Check the stored bounds without mutating anything. Invalid input is
    /// rejected before it reaches a store, so the previous value survives
    /// and the caller can correct and resubmit.
    pub fn validate(&self) -> AnnotationResult<()> {
        if let Some(height) = self.height {
            if !height.is_finite() || !(0.0..=MAX_HEIGHT).contains(&height) {
                return Err(AnnotationError::HeightOutOfRange(height));
            }
        }
        if let Some(weight) = self.weight {
            if !weight.is_finite() || !(0.0..=MAX_WEIGHT).contains(&weight) {
                return Err(AnnotationError::WeightOutOfRange(weight));
            }
        }
        if let Some(description) = &self.description {
            let len = description.trim().chars().count();
            if len > MAX_DESCRIPTION_LEN {
                return Err(AnnotationError::DescriptionTooLong(len));
            }
        }
        Ok(())
    }

    /// Trim the description, dropping it entirely when blank.
    fn normalized(mut self) -> Self {
        self.description = self.description.and_then(|text| {
            let trimmed = text.trim().to_string();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        });
        self
    }
}

fn validate_nickname(nickname: &str) -> AnnotationResult<String> {
    let trimmed = nickname.trim();
    if trimmed.is_empty() {
        return Err(AnnotationError::NicknameEmpty);
    }
    let len = trimmed.chars().count();
    if len > MAX_NICKNAME_LEN {
        return Err(AnnotationError::NicknameTooLong(len));
    }
    Ok(trimmed.to_string())
}

/// Keyed upsert/delete storage for both annotation tables.
pub trait AnnotationStore {
    /// Stored about-info for an id, or empty defaults when none exists.
    fn about(&self, id: u16) -> AboutInfo;

    /// Validate and upsert; returns the normalized value actually stored.
    fn set_about(&mut self, id: u16, info: AboutInfo) -> AnnotationResult<AboutInfo>;

    fn delete_about(&mut self, id: u16) -> AnnotationResult<()>;

    fn nickname(&self, id: u16) -> Option<String>;

    fn set_nickname(&mut self, id: u16, nickname: &str) -> AnnotationResult<String>;

    fn delete_nickname(&mut self, id: u16) -> AnnotationResult<()>;
}

/// Both tables, as one serializable unit for the file-backed store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct AnnotationData {
    about: HashMap<u16, AboutInfo>,
    nicknames: HashMap<u16, String>,
}

/// Volatile store for tests and short-lived sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryAnnotationStore {
    data: AnnotationData,
}

impl MemoryAnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnnotationStore for MemoryAnnotationStore {
    fn about(&self, id: u16) -> AboutInfo {
        self.data.about.get(&id).cloned().unwrap_or_default()
    }

    fn set_about(&mut self, id: u16, info: AboutInfo) -> AnnotationResult<AboutInfo> {
        info.validate()?;
        let stored = info.normalized();
        self.data.about.insert(id, stored.clone());
        Ok(stored)
    }

    fn delete_about(&mut self, id: u16) -> AnnotationResult<()> {
        self.data.about.remove(&id);
        Ok(())
    }

    fn nickname(&self, id: u16) -> Option<String> {
        self.data.nicknames.get(&id).cloned()
    }

    fn set_nickname(&mut self, id: u16, nickname: &str) -> AnnotationResult<String> {
        let stored = validate_nickname(nickname)?;
        self.data.nicknames.insert(id, stored.clone());
        Ok(stored)
    }

    fn delete_nickname(&mut self, id: u16) -> AnnotationResult<()> {
        self.data.nicknames.remove(&id);
        Ok(())
    }
}

/// File-backed store persisting both tables as one RON document. The whole
/// file is rewritten on every mutation; annotation volumes are tiny.
#[derive(Debug)]
pub struct FileAnnotationStore {
    path: PathBuf,
    data: AnnotationData,
}

impl FileAnnotationStore {
    /// Open a store, loading existing annotations when the file is present.
    pub fn open(path: impl Into<PathBuf>) -> AnnotationResult<Self> {
        let path = path.into();
        let data = if path.exists() {
            let content =
                fs::read_to_string(&path).map_err(|err| AnnotationError::Io(err.to_string()))?;
            ron::from_str(&content).map_err(|err| AnnotationError::Encoding(err.to_string()))?
        } else {
            AnnotationData::default()
        };
        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> AnnotationResult<()> {
        let content = ron::ser::to_string_pretty(&self.data, ron::ser::PrettyConfig::default())
            .map_err(|err| AnnotationError::Encoding(err.to_string()))?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| AnnotationError::Io(err.to_string()))?;
        }
        fs::write(&self.path, content).map_err(|err| AnnotationError::Io(err.to_string()))
    }
}

impl AnnotationStore for FileAnnotationStore {
    fn about(&self, id: u16) -> AboutInfo {
        self.data.about.get(&id).cloned().unwrap_or_default()
    }

    fn set_about(&mut self, id: u16, info: AboutInfo) -> AnnotationResult<AboutInfo> {
        info.validate()?;
        let stored = info.normalized();
        self.data.about.insert(id, stored.clone());
        self.save()?;
        Ok(stored)
    }

    fn delete_about(&mut self, id: u16) -> AnnotationResult<()> {
        if self.data.about.remove(&id).is_some() {
            self.save()?;
        }
        Ok(())
    }

    fn nickname(&self, id: u16) -> Option<String> {
        self.data.nicknames.get(&id).cloned()
    }

    fn set_nickname(&mut self, id: u16, nickname: &str) -> AnnotationResult<String> {
        let stored = validate_nickname(nickname)?;
        self.data.nicknames.insert(id, stored.clone());
        self.save()?;
        Ok(stored)
    }

    fn delete_nickname(&mut self, id: u16) -> AnnotationResult<()> {
        if self.data.nicknames.remove(&id).is_some() {
            self.save()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn about(height: Option<f64>, weight: Option<f64>, description: Option<&str>) -> AboutInfo {
        AboutInfo {
            height,
            weight,
            description: description.map(|s| s.to_string()),
        }
    }

    #[rstest]
    #[case(about(Some(0.0), None, None))]
    #[case(about(Some(1000.0), Some(10_000.0), None))]
    #[case(about(None, None, Some("a perfectly fine description")))]
    #[case(AboutInfo::default())]
    fn valid_about_info_passes(#[case] info: AboutInfo) {
        assert_eq!(info.validate(), Ok(()));
    }

    #[rstest]
    #[case(about(Some(-0.1), None, None), AnnotationError::HeightOutOfRange(-0.1))]
    #[case(about(Some(1000.5), None, None), AnnotationError::HeightOutOfRange(1000.5))]
    #[case(about(None, Some(-1.0), None), AnnotationError::WeightOutOfRange(-1.0))]
    #[case(about(None, Some(10_000.5), None), AnnotationError::WeightOutOfRange(10_000.5))]
    fn out_of_range_values_are_rejected(#[case] info: AboutInfo, #[case] expected: AnnotationError) {
        assert_eq!(info.validate(), Err(expected));
    }

    #[test]
    fn nan_height_is_rejected() {
        let info = about(Some(f64::NAN), None, None);
        assert!(matches!(
            info.validate(),
            Err(AnnotationError::HeightOutOfRange(_))
        ));
    }

    #[test]
    fn overlong_description_is_rejected() {
        let long = "x".repeat(501);
        let info = about(None, None, Some(&long));
        assert_eq!(info.validate(), Err(AnnotationError::DescriptionTooLong(501)));

        let just_fits = "x".repeat(500);
        let info = about(None, None, Some(&just_fits));
        assert_eq!(info.validate(), Ok(()));
    }

    #[test]
    fn memory_store_upserts_and_deletes_about_info() {
        let mut store = MemoryAnnotationStore::new();
        assert!(store.about(25).is_empty());

        let stored = store
            .set_about(25, about(Some(4.0), Some(60.0), Some("  zappy  ")))
            .expect("valid info should store");
        assert_eq!(stored.description.as_deref(), Some("zappy"));
        assert_eq!(store.about(25), stored);

        // Upsert overwrites in place.
        let replaced = store
            .set_about(25, about(Some(5.0), None, None))
            .expect("valid info should store");
        assert_eq!(store.about(25), replaced);

        store.delete_about(25).expect("delete should succeed");
        assert!(store.about(25).is_empty());
    }

    #[test]
    fn rejected_update_leaves_the_previous_value() {
        let mut store = MemoryAnnotationStore::new();
        let original = store
            .set_about(7, about(Some(1.0), None, None))
            .expect("valid info should store");

        let err = store.set_about(7, about(Some(-3.0), None, None));
        assert_eq!(err, Err(AnnotationError::HeightOutOfRange(-3.0)));
        assert_eq!(store.about(7), original);
    }

    #[test]
    fn nicknames_are_trimmed_and_validated() {
        let mut store = MemoryAnnotationStore::new();
        assert_eq!(store.nickname(1), None);

        let stored = store.set_nickname(1, "  Bulby  ").expect("valid nickname");
        assert_eq!(stored, "Bulby");
        assert_eq!(store.nickname(1).as_deref(), Some("Bulby"));

        assert_eq!(store.set_nickname(1, "   "), Err(AnnotationError::NicknameEmpty));
        assert_eq!(
            store.set_nickname(1, &"n".repeat(101)),
            Err(AnnotationError::NicknameTooLong(101))
        );

        store.delete_nickname(1).expect("delete should succeed");
        assert_eq!(store.nickname(1), None);
    }

    #[test]
    fn file_store_survives_reopening() {
        let path = std::env::temp_dir().join(format!(
            "pokehub-annotations-{}.ron",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);

        {
            let mut store = FileAnnotationStore::open(&path).expect("store should open");
            store
                .set_about(4, about(Some(6.0), Some(85.0), Some("fiery")))
                .expect("valid info should store");
            store.set_nickname(4, "Char").expect("valid nickname");
        }

        let reopened = FileAnnotationStore::open(&path).expect("store should reopen");
        assert_eq!(reopened.about(4).description.as_deref(), Some("fiery"));
        assert_eq!(reopened.about(4).height, Some(6.0));
        assert_eq!(reopened.nickname(4).as_deref(), Some("Char"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn file_store_delete_persists() {
        let path = std::env::temp_dir().join(format!(
            "pokehub-annotations-delete-{}.ron",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);

        {
            let mut store = FileAnnotationStore::open(&path).expect("store should open");
            store.set_nickname(9, "Blasty").expect("valid nickname");
            store.delete_nickname(9).expect("delete should succeed");
        }

        let reopened = FileAnnotationStore::open(&path).expect("store should reopen");
        assert_eq!(reopened.nickname(9), None);

        let _ = fs::remove_file(&path);
    }
}
