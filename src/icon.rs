//! Icon bitmaps and the registry that resolves them by name.
//!
//! The registry belongs to the host application: it is filled once at start
//! up through [`IconRegistry::register`], then shared read-only (behind an
//! `Arc`) with whatever builds notifications. Names that were never
//! registered are loaded lazily from the image directory and kept in a
//! bounded cache.

use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use lru::LruCache;
use tracing::debug;

use crate::config::IconSettings;
use crate::error::IconError;

/// Decoded RGBA8 bitmap.
#[derive(Clone, PartialEq, Eq)]
pub struct Icon {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Icon {
    #[must_use]
    pub const fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Decode an encoded image (PNG) into RGBA8.
    ///
    /// # Errors
    ///
    /// Returns [`IconError::Decode`] when the bytes are not a supported image.
    pub fn decode(name: &str, bytes: &[u8]) -> Result<Self, IconError> {
        let image = image::load_from_memory(bytes).map_err(|source| IconError::Decode {
            name: name.to_string(),
            source,
        })?;
        let rgba = image.to_rgba8();
        Ok(Self::from_rgba(rgba.width(), rgba.height(), rgba.into_raw()))
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

impl fmt::Debug for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Icon")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Graphics shipped for the stock notification variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BuiltinIcon {
    Warning,
    Information,
    Error,
    Confirm,
}

impl BuiltinIcon {
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Warning => "dialog-warning.png",
            Self::Information => "dialog-information.png",
            Self::Error => "dialog-error.png",
            Self::Confirm => "dialog-confirm.png",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IconRef {
    /// Looked up in the registry, then in the image directory.
    Named(String),
    Builtin(BuiltinIcon),
    /// Supplied by the caller; never cached.
    Bitmap(Arc<Icon>),
}

impl IconRef {
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Builtin(builtin) => Some(builtin.file_name()),
            Self::Bitmap(_) => None,
        }
    }
}

pub struct IconRegistry {
    image_dir: PathBuf,
    registered: HashMap<String, Arc<Icon>>,
    loaded: Mutex<LruCache<String, Arc<Icon>>>,
}

impl IconRegistry {
    #[must_use]
    pub fn new(settings: &IconSettings) -> Self {
        let capacity = NonZeroUsize::new(settings.cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            image_dir: settings.image_dir.clone(),
            registered: HashMap::new(),
            loaded: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Pin `icon` under `name`, overriding what the image directory holds.
    ///
    /// # Errors
    ///
    /// Returns [`IconError::AlreadyRegistered`] if `name` was registered or
    /// already loaded; the first bitmap stays in place.
    pub fn register(&mut self, name: impl Into<String>, icon: Icon) -> Result<(), IconError> {
        let name = name.into();
        if self.registered.contains_key(&name) || self.lock_loaded().contains(&name) {
            return Err(IconError::AlreadyRegistered { name });
        }
        debug!(icon = %name, "registered icon");
        self.registered.insert(name, Arc::new(icon));
        Ok(())
    }

    /// Find the bitmap for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`IconError::Unavailable`] if the file cannot be read and
    /// [`IconError::Decode`] if it is not a valid image.
    pub fn resolve(&self, name: &str) -> Result<Arc<Icon>, IconError> {
        if let Some(icon) = self.registered.get(name) {
            return Ok(Arc::clone(icon));
        }
        if let Some(icon) = self.lock_loaded().get(name) {
            return Ok(Arc::clone(icon));
        }

        let path = self.image_dir.join(name);
        let bytes = std::fs::read(&path).map_err(|source| IconError::Unavailable {
            name: name.to_string(),
            path: path.clone(),
            source,
        })?;
        let icon = Arc::new(Icon::decode(name, &bytes)?);
        debug!(icon = %name, path = %path.display(), "loaded icon from disk");
        self.lock_loaded().put(name.to_string(), Arc::clone(&icon));
        Ok(icon)
    }

    /// Resolve any kind of icon reference.
    ///
    /// # Errors
    ///
    /// Same as [`IconRegistry::resolve`].
    pub fn resolve_ref(&self, icon: &IconRef) -> Result<Arc<Icon>, IconError> {
        match icon {
            IconRef::Named(name) => self.resolve(name),
            IconRef::Builtin(builtin) => self.resolve(builtin.file_name()),
            IconRef::Bitmap(bitmap) => Ok(Arc::clone(bitmap)),
        }
    }

    /// Resolve `icon` only if that needs no disk access.
    #[must_use]
    pub fn cached(&self, icon: &IconRef) -> Option<Arc<Icon>> {
        let name = match icon {
            IconRef::Bitmap(bitmap) => return Some(Arc::clone(bitmap)),
            IconRef::Named(name) => name.as_str(),
            IconRef::Builtin(builtin) => builtin.file_name(),
        };
        if let Some(icon) = self.registered.get(name) {
            return Some(Arc::clone(icon));
        }
        self.lock_loaded().get(name).map(Arc::clone)
    }

    fn lock_loaded(&self) -> std::sync::MutexGuard<'_, LruCache<String, Arc<Icon>>> {
        self.loaded.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for IconRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IconRegistry")
            .field("image_dir", &self.image_dir)
            .field("registered", &self.registered.len())
            .finish_non_exhaustive()
    }
}
