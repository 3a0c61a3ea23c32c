//! XrData - Data carried together with its metadata

use super::{MdDict, MdValue};
use crate::error::{Error, Result};

/// Wraps an arbitrary data object together with an [`MdDict`]
///
/// An immutable instance rejects every mutation of both the data and the
/// metadata.
///
/// # Examples
///
/// ```
/// use scatterkit_core::{Frame, XrData};
///
/// let mut xr = XrData::new(Frame::new(4, 4).unwrap());
/// xr.set("wavelength", 1.54).unwrap();
/// assert_eq!(xr.meta_data_keys(), vec!["wavelength"]);
///
/// let frozen = XrData::frozen(0u8, Default::default());
/// assert!(!frozen.is_mutable());
/// ```
#[derive(Debug, Clone)]
pub struct XrData<T> {
    data: T,
    md: MdDict,
    mutable: bool,
}

impl<T> XrData<T> {
    /// Wrap `data` with empty, mutable metadata
    pub fn new(data: T) -> Self {
        Self::with_metadata(data, MdDict::new())
    }

    /// Wrap `data` with existing metadata
    pub fn with_metadata(data: T, md: MdDict) -> Self {
        XrData {
            data,
            md,
            mutable: true,
        }
    }

    /// Wrap `data` in an instance that rejects mutation
    pub fn frozen(data: T, md: MdDict) -> Self {
        XrData {
            data,
            md,
            mutable: false,
        }
    }

    /// Whether data and metadata may be modified
    pub fn is_mutable(&self) -> bool {
        self.mutable
    }

    /// The carried data
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Replace the carried data
    ///
    /// # Errors
    ///
    /// Returns `Error::Immutable` on a frozen instance.
    pub fn set_data(&mut self, data: T) -> Result<()> {
        self.ensure_mutable()?;
        self.data = data;
        Ok(())
    }

    /// The metadata tree
    pub fn metadata(&self) -> &MdDict {
        &self.md
    }

    /// Look up a metadata leaf by dotted path
    pub fn get(&self, key: &str) -> Option<&MdValue> {
        self.md.get(key)
    }

    /// Set a metadata leaf by dotted path
    ///
    /// # Errors
    ///
    /// Returns `Error::Immutable` on a frozen instance, or any error from
    /// [`MdDict::set`].
    pub fn set(&mut self, key: &str, value: impl Into<MdValue>) -> Result<()> {
        self.ensure_mutable()?;
        self.md.set(key, value)
    }

    /// Dotted paths of every metadata leaf
    pub fn meta_data_keys(&self) -> Vec<String> {
        self.md.keys()
    }

    /// Consume the wrapper and return data and metadata
    pub fn into_parts(self) -> (T, MdDict) {
        (self.data, self.md)
    }

    fn ensure_mutable(&self) -> Result<()> {
        if self.mutable {
            Ok(())
        } else {
            Err(Error::Immutable("XrData"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::Value;

    #[test]
    fn test_mutable_roundtrip() {
        let mut xr = XrData::new(vec![1.0, 2.0]);
        xr.set("detector.distance", 3.5).unwrap();
        xr.set_data(vec![4.0]).unwrap();
        assert_eq!(xr.data(), &vec![4.0]);
        assert_eq!(
            xr.get("detector.distance").unwrap().value,
            Value::Float(3.5)
        );
    }

    #[test]
    fn test_frozen_rejects_mutation() {
        let mut md = MdDict::new();
        md.set("a", 1i64).unwrap();
        let mut xr = XrData::frozen(7u32, md);
        assert!(matches!(xr.set_data(8), Err(Error::Immutable(_))));
        assert!(matches!(xr.set("b", 2i64), Err(Error::Immutable(_))));
        assert_eq!(*xr.data(), 7);
        assert_eq!(xr.meta_data_keys(), vec!["a"]);
    }
}
