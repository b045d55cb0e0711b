//! JSON round trips of the plain-data types behind the `serde` feature.
#![cfg(feature = "serde")]

use strided_blas::{
    rotg, Diag, ModifiedRotation, Order, PlaneRotation, RotmFlag, RotmParams, Structure, Uplo,
};

fn round_trip<T>(value: &T) -> T
where
    T: serde::Serialize + serde::de::DeserializeOwned,
{
    let json = serde_json::to_string(value).unwrap();
    serde_json::from_str(&json).unwrap()
}

#[test]
fn test_rotm_params_round_trip() {
    let params = RotmParams::new(RotmFlag::Full, [0.5, -0.25, 4096.0, 1.0]);
    assert_eq!(round_trip(&params), params);

    let m = ModifiedRotation {
        params: RotmParams::new(RotmFlag::OffDiagonal, [1.0, -0.5, 0.125, 1.0]),
        d1: 2.0_f64,
        d2: 0.75,
        x1: -3.5,
    };
    assert_eq!(round_trip(&m), m);
}

#[test]
fn test_plane_rotation_round_trip() {
    // a == b == 0 gives exactly representable fields
    let g = rotg(0.0_f32, 0.0);
    assert_eq!(round_trip(&g), g);

    let g = PlaneRotation {
        c: 0.5_f64,
        s: -0.75,
        r: 8.0,
        z: 2.0,
    };
    assert_eq!(round_trip(&g), g);
}

#[test]
fn test_structure_and_codes_round_trip() {
    let s = Structure::TriangularBand {
        uplo: Uplo::Lower,
        diag: Diag::Unit,
        k: 2,
    };
    assert_eq!(round_trip(&s), s);
    assert_eq!(round_trip(&Order::ColMajor), Order::ColMajor);
    assert_eq!(round_trip(&Uplo::Upper), Uplo::Upper);
}
