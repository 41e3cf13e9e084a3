//=========================================================================
// Asset Requests
//=========================================================================
//
// Content kinds and the loader seam used by drawable components.
//
//   "hero.png" + "image" ─► AssetRequest ─► AssetLoader::load ─► AssetHandle
//
// The runtime never decodes media. Hosts implement `AssetLoader` over
// their own audio/image backends; `CachingLoader` is an in-memory loader
// that hands out stable handles per (source, kind).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::error::EngineError;

//=== AssetKind ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Audio,
    Image,
}

impl FromStr for AssetKind {
    type Err = EngineError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "audio" => Ok(Self::Audio),
            "image" => Ok(Self::Image),
            other => Err(EngineError::UnknownContentKind(other.to_string())),
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Audio => f.write_str("audio"),
            Self::Image => f.write_str("image"),
        }
    }
}

//=== AssetRequest ========================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetRequest {
    pub source: String,
    pub kind: AssetKind,
}

impl AssetRequest {
    pub fn new(source: impl Into<String>, kind: AssetKind) -> Self {
        Self {
            source: source.into(),
            kind,
        }
    }

    /// Builds a request from a textual content kind.
    pub fn parse(source: impl Into<String>, kind: &str) -> Result<Self, EngineError> {
        Ok(Self::new(source, kind.parse()?))
    }
}

//=== AssetHandle =========================================================

/// Opaque reference to loaded media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetHandle {
    id: u64,
    kind: AssetKind,
}

impl AssetHandle {
    pub fn new(id: u64, kind: AssetKind) -> Self {
        Self { id, kind }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> AssetKind {
        self.kind
    }
}

//=== AssetLoader Trait ===================================================

pub trait AssetLoader {
    fn load(&mut self, request: &AssetRequest) -> AssetHandle;
}

//=== CachingLoader =======================================================

/// Loader that assigns sequential handles and returns the same handle for
/// repeated requests.
#[derive(Debug, Default)]
pub struct CachingLoader {
    handles: HashMap<AssetRequest, AssetHandle>,
    next_id: u64,
}

impl CachingLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl AssetLoader for CachingLoader {
    fn load(&mut self, request: &AssetRequest) -> AssetHandle {
        if let Some(handle) = self.handles.get(request) {
            return *handle;
        }

        let handle = AssetHandle::new(self.next_id, request.kind);
        self.next_id += 1;
        debug!(target: "asset", "Loaded {} '{}' as #{}", request.kind, request.source, handle.id);
        self.handles.insert(request.clone(), handle);
        handle
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_parse_from_text() {
        assert_eq!("audio".parse::<AssetKind>(), Ok(AssetKind::Audio));
        assert_eq!("image".parse::<AssetKind>(), Ok(AssetKind::Image));
        assert_eq!(AssetKind::Image.to_string(), "image");
    }

    #[test]
    fn unknown_kind_is_a_configuration_error() {
        let err = AssetRequest::parse("intro.webm", "video").unwrap_err();
        assert_eq!(err, EngineError::UnknownContentKind("video".into()));
    }

    #[test]
    fn caching_loader_reuses_handles() {
        let mut loader = CachingLoader::new();
        let hero = AssetRequest::parse("hero.png", "image").unwrap();
        let jump = AssetRequest::new("jump.wav", AssetKind::Audio);

        let first = loader.load(&hero);
        let again = loader.load(&hero);
        let sound = loader.load(&jump);

        assert_eq!(first, again);
        assert_ne!(first.id(), sound.id());
        assert_eq!(sound.kind(), AssetKind::Audio);
        assert_eq!(loader.len(), 2);
    }

    #[test]
    fn same_source_different_kind_is_distinct() {
        let mut loader = CachingLoader::new();
        let a = loader.load(&AssetRequest::new("blob", AssetKind::Audio));
        let b = loader.load(&AssetRequest::new("blob", AssetKind::Image));
        assert_ne!(a, b);
    }
}
