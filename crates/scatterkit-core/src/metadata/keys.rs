//! Catalog of well-known metadata keys

/// Expected shape of a well-known key's value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// Fixed-size numeric tuple
    Tuple(usize),
    /// Scalar float
    Float,
    /// Flattened 2D array with the given number of rows and columns
    Matrix(usize, usize),
}

/// Description of a well-known metadata key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: KeyKind,
    pub units: Option<&'static str>,
}

/// Keys shared by every detector data-reduction step
pub const CORE_KEYS: &[KeySpec] = &[
    KeySpec {
        name: "pixel_size",
        description: "2 element tuple defining the (x y) dimensions of the pixel",
        kind: KeyKind::Tuple(2),
        units: Some("um"),
    },
    KeySpec {
        name: "voxel_size",
        description: "3 element tuple defining the (x y z) dimensions of the voxel",
        kind: KeyKind::Tuple(3),
        units: Some("um"),
    },
    KeySpec {
        name: "calibrated_center",
        description: "2 element tuple defining the (x y) center of the detector in pixels",
        kind: KeyKind::Tuple(2),
        units: Some("pixel"),
    },
    KeySpec {
        name: "detector_size",
        description: "2 element tuple defining no. of pixels(size) in the detector X and Y direction",
        kind: KeyKind::Tuple(2),
        units: Some("pixel"),
    },
    KeySpec {
        name: "detector_tilt_angles",
        description: "Detector tilt angle",
        kind: KeyKind::Tuple(2),
        units: Some("degrees"),
    },
    KeySpec {
        name: "dist_sample",
        description: "distance from the sample to the detector (mm)",
        kind: KeyKind::Float,
        units: Some("mm"),
    },
    KeySpec {
        name: "wavelength",
        description: "wavelength of incident radiation (Angstroms)",
        kind: KeyKind::Float,
        units: Some("angstrom"),
    },
    KeySpec {
        name: "ub_mat",
        description: "UB matrix(orientation matrix) 3x3 array",
        kind: KeyKind::Matrix(3, 3),
        units: None,
    },
];

/// Look up a well-known key by name
pub fn core_key(name: &str) -> Option<&'static KeySpec> {
    CORE_KEYS.iter().find(|k| k.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let spec = core_key("wavelength").unwrap();
        assert_eq!(spec.units, Some("angstrom"));
        assert_eq!(spec.kind, KeyKind::Float);
        assert!(core_key("no_such_key").is_none());
    }

    #[test]
    fn test_names_unique() {
        for (i, a) in CORE_KEYS.iter().enumerate() {
            assert!(CORE_KEYS[i + 1..].iter().all(|b| b.name != a.name));
        }
    }
}
