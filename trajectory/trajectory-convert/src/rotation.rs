//! Rotation conversions and the rotation codec registry.
//!
//! Recorded rotations are Euler angles under the fixed X-Y-Z intrinsic
//! convention (`R = Rx(a) * Ry(b) * Rz(c)`). Converted datasets carry the
//! rotation both as the raw Euler triple and as a continuous 6D encoding:
//! the first two rows of the rotation matrix. The 6D form is non-redundant
//! and free of the discontinuities that make Euler angles awkward as a
//! learning target; the matrix is recovered by Gram-Schmidt
//! orthonormalization of the two rows.
//!
//! Codecs are selected by name through [`RotationCodecRegistry`], resolved
//! once at configuration-load time.

use std::collections::BTreeMap;
use std::sync::Arc;

use nalgebra::{Matrix3, Rotation3, RowVector3, Vector3};

use crate::error::{ConvertError, ConvertResult};

/// Normalization threshold below which a 6D row is considered degenerate.
const DEGENERATE_EPS: f64 = 1e-12;

/// Builds the rotation matrix for Euler angles under the X-Y-Z intrinsic
/// convention.
#[must_use]
pub fn euler_xyz_to_matrix(angles: Vector3<f64>) -> Matrix3<f64> {
    let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), angles[0]);
    let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), angles[1]);
    let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), angles[2]);
    (rx * ry * rz).into_inner()
}

/// Extracts X-Y-Z intrinsic Euler angles from a rotation matrix.
///
/// Inverse of [`euler_xyz_to_matrix`] away from the `cos(b) = 0` gimbal
/// singularity.
#[must_use]
pub fn matrix_to_euler_xyz(m: &Matrix3<f64>) -> Vector3<f64> {
    // With R = Rx(a) * Ry(b) * Rz(c): R[(0,2)] = sin(b),
    // R[(1,2)] = -sin(a)cos(b), R[(2,2)] = cos(a)cos(b),
    // R[(0,1)] = -cos(b)sin(c), R[(0,0)] = cos(b)cos(c).
    let b = m[(0, 2)].clamp(-1.0, 1.0).asin();
    let a = (-m[(1, 2)]).atan2(m[(2, 2)]);
    let c = (-m[(0, 1)]).atan2(m[(0, 0)]);
    Vector3::new(a, b, c)
}

/// Encodes a rotation matrix as its first two rows, concatenated.
#[must_use]
pub fn matrix_to_rotation_6d(m: &Matrix3<f64>) -> [f64; 6] {
    [
        m[(0, 0)],
        m[(0, 1)],
        m[(0, 2)],
        m[(1, 0)],
        m[(1, 1)],
        m[(1, 2)],
    ]
}

/// Recovers a rotation matrix from its 6D encoding.
///
/// # Errors
///
/// Returns [`ConvertError::DegenerateRotation`] when either row cannot be
/// normalized (zero or collinear rows).
pub fn rotation_6d_to_matrix(encoded: &[f64; 6]) -> ConvertResult<Matrix3<f64>> {
    let a1 = Vector3::new(encoded[0], encoded[1], encoded[2]);
    let a2 = Vector3::new(encoded[3], encoded[4], encoded[5]);

    let b1 = a1
        .try_normalize(DEGENERATE_EPS)
        .ok_or(ConvertError::DegenerateRotation)?;
    let b2 = (a2 - b1 * b1.dot(&a2))
        .try_normalize(DEGENERATE_EPS)
        .ok_or(ConvertError::DegenerateRotation)?;
    let b3 = b1.cross(&b2);

    Ok(Matrix3::from_rows(&[
        RowVector3::new(b1[0], b1[1], b1[2]),
        RowVector3::new(b2[0], b2[1], b2[2]),
        RowVector3::new(b3[0], b3[1], b3[2]),
    ]))
}

/// A named rotation encoding.
pub trait RotationCodec: Send + Sync {
    /// Codec name; derived datasets are stored as `<prefix>rot_<name>`.
    fn name(&self) -> &'static str;

    /// Number of values one encoded rotation occupies.
    fn dim(&self) -> usize;

    /// Encodes a rotation matrix.
    fn encode(&self, rotation: &Matrix3<f64>) -> Vec<f64>;

    /// Decodes a rotation matrix.
    ///
    /// # Errors
    ///
    /// Returns an error when `encoded` does not describe a rotation.
    fn decode(&self, encoded: &[f64]) -> ConvertResult<Matrix3<f64>>;
}

/// The 6D continuous encoding (first two matrix rows).
#[derive(Debug, Clone, Copy, Default)]
pub struct SixDCodec;

impl RotationCodec for SixDCodec {
    fn name(&self) -> &'static str {
        "6d"
    }

    fn dim(&self) -> usize {
        6
    }

    fn encode(&self, rotation: &Matrix3<f64>) -> Vec<f64> {
        matrix_to_rotation_6d(rotation).to_vec()
    }

    fn decode(&self, encoded: &[f64]) -> ConvertResult<Matrix3<f64>> {
        let arr: [f64; 6] = encoded
            .try_into()
            .map_err(|_| ConvertError::DegenerateRotation)?;
        rotation_6d_to_matrix(&arr)
    }
}

/// The raw Euler triple under the X-Y-Z intrinsic convention.
#[derive(Debug, Clone, Copy, Default)]
pub struct EulerCodec;

impl RotationCodec for EulerCodec {
    fn name(&self) -> &'static str {
        "euler"
    }

    fn dim(&self) -> usize {
        3
    }

    fn encode(&self, rotation: &Matrix3<f64>) -> Vec<f64> {
        let angles = matrix_to_euler_xyz(rotation);
        vec![angles[0], angles[1], angles[2]]
    }

    fn decode(&self, encoded: &[f64]) -> ConvertResult<Matrix3<f64>> {
        if encoded.len() != 3 {
            return Err(ConvertError::DegenerateRotation);
        }
        Ok(euler_xyz_to_matrix(Vector3::new(
            encoded[0], encoded[1], encoded[2],
        )))
    }
}

/// Registry of rotation codecs, keyed by name.
///
/// String-referenced codec selection resolves against this registry once
/// when configuration is loaded; an unknown name is an explicit error, not
/// a runtime lookup failure mid-conversion.
///
/// # Example
///
/// ```
/// use trajectory_convert::RotationCodecRegistry;
///
/// let registry = RotationCodecRegistry::default();
/// assert!(registry.get("6d").is_ok());
/// assert!(registry.get("quaternion").is_err());
/// ```
pub struct RotationCodecRegistry {
    codecs: BTreeMap<&'static str, Arc<dyn RotationCodec>>,
}

impl Default for RotationCodecRegistry {
    fn default() -> Self {
        let mut registry = Self {
            codecs: BTreeMap::new(),
        };
        registry.register(Arc::new(SixDCodec));
        registry.register(Arc::new(EulerCodec));
        registry
    }
}

impl RotationCodecRegistry {
    /// Registers a codec under its own name, replacing any existing entry.
    pub fn register(&mut self, codec: Arc<dyn RotationCodec>) {
        self.codecs.insert(codec.name(), codec);
    }

    /// Resolves a codec by name.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::UnknownRotationCodec`] listing the
    /// registered names.
    pub fn get(&self, name: &str) -> ConvertResult<Arc<dyn RotationCodec>> {
        self.codecs
            .get(name)
            .cloned()
            .ok_or_else(|| ConvertError::UnknownRotationCodec {
                name: name.to_string(),
                available: self.names().join(", "),
            })
    }

    /// Registered codec names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.codecs.keys().copied().collect()
    }
}

impl std::fmt::Debug for RotationCodecRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotationCodecRegistry")
            .field("codecs", &self.names())
            .finish()
    }
}
