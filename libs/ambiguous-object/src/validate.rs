//! # Outline Validator
//!
//! Checks that a mesh can serve as an outline: a single flat face, centered
//! on the origin and covering it. Checks run in a fixed order and the first
//! failure is returned.
//!
//! Call this after the outline's transform has been applied; vertex
//! coordinates are read as world coordinates.

use crate::error::AmbiguousError;
use config::constants::{ORIGIN, SMALL_DISTANCE};
use glam::DVec3;
use mesh_kernel::{GeometryKernel, Mesh};

/// Validates `outline` without modifying it.
///
/// # Errors
///
/// In check order: `NotSingleFace`, `OriginNotCentered`, `NotFlat`,
/// `OriginNotCovered`.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use ambiguous_object::validate::validate;
/// use mesh_kernel::{Mesh, MeshKernel};
///
/// let square = Mesh::from_polygon("Square", &[
///     DVec3::new(-1.0, -1.0, 0.0),
///     DVec3::new(1.0, -1.0, 0.0),
///     DVec3::new(1.0, 1.0, 0.0),
///     DVec3::new(-1.0, 1.0, 0.0),
/// ]);
/// assert!(validate(&square, &MeshKernel).is_ok());
/// ```
pub fn validate<K>(outline: &Mesh, kernel: &K) -> Result<(), AmbiguousError>
where
    K: GeometryKernel + ?Sized,
{
    let name = outline.name();
    let origin = DVec3::from_array(ORIGIN);

    if outline.face_count() != 1 {
        return Err(AmbiguousError::NotSingleFace {
            outline: name.to_string(),
            faces: outline.face_count(),
        });
    }

    if outline.transform().w_axis.truncate() != origin {
        return Err(AmbiguousError::OriginNotCentered {
            outline: name.to_string(),
        });
    }

    if let Some((vertex, z)) = outline
        .vertices()
        .iter()
        .enumerate()
        .map(|(i, p)| (i as u32, p.z))
        .find(|(_, z)| z.is_nan() || *z > SMALL_DISTANCE)
    {
        return Err(AmbiguousError::NotFlat {
            outline: name.to_string(),
            vertex,
            z,
        });
    }

    let covered = kernel
        .closest_point_on_surface(outline, origin)
        .is_some_and(|hit| hit.location.distance(origin) <= SMALL_DISTANCE);
    if !covered {
        return Err(AmbiguousError::OriginNotCovered {
            outline: name.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DMat4;
    use mesh_kernel::MeshKernel;

    fn square(name: &str, center: DVec3, half: f64) -> Mesh {
        Mesh::from_polygon(
            name,
            &[
                center + DVec3::new(-half, -half, 0.0),
                center + DVec3::new(half, -half, 0.0),
                center + DVec3::new(half, half, 0.0),
                center + DVec3::new(-half, half, 0.0),
            ],
        )
    }

    /// Test that a centered square passes, twice.
    #[test]
    fn test_valid_outline_is_idempotent() {
        let outline = square("Square", DVec3::ZERO, 1.0);
        let before = outline.clone();
        assert_eq!(validate(&outline, &MeshKernel), Ok(()));
        assert_eq!(validate(&outline, &MeshKernel), Ok(()));
        assert_eq!(outline, before);
    }

    /// Test that face count is checked before anything else.
    #[test]
    fn test_face_count_checked_first() {
        // Two faces, off-center, not flat, not covering the origin
        let mut outline = square("Pair", DVec3::new(5.0, 5.0, 3.0), 1.0);
        outline.add_face(vec![0, 1, 2]).unwrap();
        outline.set_transform(DMat4::from_translation(DVec3::X));
        assert_eq!(
            validate(&outline, &MeshKernel),
            Err(AmbiguousError::NotSingleFace {
                outline: "Pair".into(),
                faces: 2
            })
        );

        let empty = Mesh::new("Empty");
        assert!(matches!(
            validate(&empty, &MeshKernel),
            Err(AmbiguousError::NotSingleFace { faces: 0, .. })
        ));
    }

    /// Test that a translated transform is rejected.
    #[test]
    fn test_origin_not_centered() {
        let mut outline = square("Moved", DVec3::ZERO, 1.0);
        outline.set_transform(DMat4::from_translation(DVec3::new(0.0, 0.0, 1e-9)));
        assert!(matches!(
            validate(&outline, &MeshKernel),
            Err(AmbiguousError::OriginNotCentered { .. })
        ));
    }

    /// Test the flatness tolerance.
    #[test]
    fn test_not_flat() {
        let within = square("Within", DVec3::new(0.0, 0.0, SMALL_DISTANCE / 2.0), 1.0);
        assert!(validate(&within, &MeshKernel).is_ok());

        let above = square("Above", DVec3::new(0.0, 0.0, 0.01), 1.0);
        match validate(&above, &MeshKernel) {
            Err(AmbiguousError::NotFlat { vertex, z, .. }) => {
                assert_eq!(vertex, 0);
                assert_eq!(z, 0.01);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    /// Test that below-plane outlines count as flat but must still cover
    /// the origin.
    #[test]
    fn test_below_plane_not_covered() {
        let sunk = square("Sunk", DVec3::new(0.0, 0.0, -1.0), 1.0);
        assert_eq!(
            validate(&sunk, &MeshKernel),
            Err(AmbiguousError::OriginNotCovered {
                outline: "Sunk".into()
            })
        );
    }

    /// Test that a face beside the origin is rejected.
    #[test]
    fn test_origin_not_covered() {
        let outline = square("Aside", DVec3::new(3.0, 0.0, 0.0), 1.0);
        assert!(matches!(
            validate(&outline, &MeshKernel),
            Err(AmbiguousError::OriginNotCovered { .. })
        ));
    }
}
