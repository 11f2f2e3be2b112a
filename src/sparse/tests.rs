// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    determinant, inverse,
    error::NotAffineError,
    layout::{Layout, StorageOrder, VectorConvention},
    matrix::{Matrix, Matrix3x4, Matrix4},
    sparse::{SparseMatrix4, SparseMatrix4d, SparseMatrix4f, SparseMatrix4i},
    vector::{Vector3, Vector4},
};
use approx::{assert_abs_diff_eq, assert_relative_eq};

fn assert_near(lhs: Matrix4<f64>, rhs: Matrix4<f64>, epsilon: f64) {
    for (l, r) in lhs.iter().zip(rhs.iter()) {
        assert_abs_diff_eq!(*l, *r, epsilon = epsilon);
    }
}

fn random_sparse(rng: &mut fastrand::Rng) -> SparseMatrix4d {
    SparseMatrix4::from_fn(|_, _| rng.f64() * 20.0 - 10.0)
}

/// A random transform whose 3x3 block is diagonally dominant, so it is always well conditioned.
fn random_invertible_sparse(rng: &mut fastrand::Rng) -> SparseMatrix4d {
    SparseMatrix4::from_fn(|row, col| {
        let value = rng.f64() * 20.0 - 10.0;
        if row == col { value + 40.0 } else { value }
    })
}

#[test]
fn test_sparse_access() {
    let mut matrix = SparseMatrix4::new([[1, 2, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12]]);

    assert_eq!(SparseMatrix4i::ROWS, 4);
    assert_eq!(SparseMatrix4i::ELEMENTS, 16);
    assert_eq!(SparseMatrix4i::ROWS_SPARSE, 3);
    assert_eq!(SparseMatrix4i::ELEMENTS_SPARSE, 12);

    assert_eq!(matrix[(1, 2)], 7);
    assert_eq!(matrix[2], [9, 10, 11, 12]);
    assert_eq!(*matrix.element(11), 12);
    assert_eq!(matrix.get(2, 3), Some(&12));
    assert_eq!(matrix.get(3, 0), None);
    assert_eq!(matrix.get(0, 4), None);

    assert_eq!(matrix.entry(0, 3), 4);
    assert_eq!(matrix.entry(3, 0), 0);
    assert_eq!(matrix.entry(3, 3), 1);

    matrix[(0, 0)] = 42;
    *matrix.element_mut(4) = 50;
    assert_eq!(matrix.as_slice()[..5], [42, 2, 3, 4, 50]);
    assert_eq!(matrix.position(), Vector3::new([4, 8, 12]));

    matrix.set_position(Vector3::new([-1, -2, -3]));
    assert_eq!(matrix.entry(2, 3), -3);
}

#[test]
#[should_panic]
fn test_entry_out_of_range() {
    let matrix = SparseMatrix4i::identity();
    let _ = matrix.entry(4, 0);
}

#[test]
fn test_construction() {
    assert_eq!(SparseMatrix4i::default(), SparseMatrix4::new([[0; 4]; 3]));
    assert_eq!(SparseMatrix4i::default().entry(3, 3), 1);

    let mut matrix = SparseMatrix4::new([[1, 2, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12]]);
    matrix.load_identity();
    assert_eq!(matrix.to_matrix(), Matrix4::identity());
    matrix.reset();
    assert!(matrix.iter().all(|elem| *elem == 0));

    let mut uninit = SparseMatrix4::<i32>::uninit();
    for (i, elem) in uninit.as_mut_slice().iter_mut().enumerate() {
        elem.write(i as i32);
    }
    let matrix = unsafe { uninit.assume_init() };
    assert!(matrix.iter().copied().eq(0..12));
}

#[test]
fn test_sparse_product_matches_dense() {
    let mut rng = fastrand::Rng::with_seed(0x5eed_4a11);
    for _ in 0..128 {
        let lhs = random_sparse(&mut rng);
        let rhs = random_sparse(&mut rng);

        let product = lhs * rhs;
        assert_near(product.to_matrix(), lhs.to_matrix() * rhs.to_matrix(), 1e-9);

        let mut accumulated = lhs;
        accumulated *= rhs;
        assert_eq!(accumulated, product);
    }
}

#[test]
fn test_translation_accumulates() {
    let offset = Vector3::new([1.0, 2.0, 3.0]);

    let mut matrix = SparseMatrix4f::identity();
    matrix *= SparseMatrix4::translation(offset);
    matrix *= SparseMatrix4::translation(offset);
    assert_eq!(matrix.position(), Vector3::new([2.0, 4.0, 6.0]));

    let mut translated = SparseMatrix4f::identity();
    translated.translate(offset);
    translated.translate(offset);
    assert_eq!(translated, matrix);
}

#[test]
fn test_transform_points_and_vectors() {
    let matrix = SparseMatrix4::new([[2, 0, 0, 10], [0, 3, 0, 20], [0, 0, 4, 30]]);

    let point = Vector3::new([1, 1, 1]);
    assert_eq!(matrix.transform_point(point), Vector3::new([12, 23, 34]));
    assert_eq!(matrix.transform_vector(point), Vector3::new([2, 3, 4]));

    assert_eq!(matrix * Vector4::new([1, 1, 1, 1]), Vector4::new([12, 23, 34, 1]));
    assert_eq!(matrix * Vector4::new([1, 1, 1, 0]), Vector4::new([2, 3, 4, 0]));
    assert_eq!(
        matrix * Vector4::new([1, 2, 3, 1]),
        matrix.to_matrix() * Vector4::new([1, 2, 3, 1]),
    );
}

#[test]
fn test_scaling_and_trace() {
    let scaling = SparseMatrix4::scaling(Vector3::new([2, 3, 4]));
    assert_eq!(
        scaling,
        SparseMatrix4::new([[2, 0, 0, 0], [0, 3, 0, 0], [0, 0, 4, 0]]),
    );
    assert_eq!(scaling.trace(), 10);

    let mut matrix = SparseMatrix4::translation(Vector3::new([1, 1, 1]));
    matrix.scale(Vector3::new([2, 3, 4]));
    assert_eq!(matrix.transform_point(Vector3::new([1, 1, 1])), Vector3::new([3, 4, 5]));
}

#[test]
fn test_sparse_determinant() {
    let matrix = SparseMatrix4::new([[1, 2, 3, 100], [0, 4, 5, 200], [1, 0, 6, 300]]);
    assert_eq!(matrix.determinant(), 22);
    assert_eq!(determinant(&matrix), 22);
    assert_eq!(matrix.to_matrix().determinant(), 22);

    let mut rng = fastrand::Rng::with_seed(0xde7);
    for _ in 0..128 {
        let matrix = random_sparse(&mut rng);
        assert_relative_eq!(
            matrix.determinant(),
            matrix.to_matrix().determinant(),
            epsilon = 1e-9,
            max_relative = 1e-9,
        );
    }
}

#[test]
fn test_sparse_inverse() {
    let matrix = SparseMatrix4::new([[0.0, -1.0, 0.0, 5.0], [1.0, 0.0, 0.0, 6.0], [0.0, 0.0, 2.0, 7.0]]);

    let expected = SparseMatrix4::new([[0.0, 1.0, 0.0, -6.0], [-1.0, 0.0, 0.0, 5.0], [0.0, 0.0, 0.5, -3.5]]);
    assert_eq!(matrix.inverse_checked(), Some(expected));
    assert!(matrix.has_inverse());

    let mut out = SparseMatrix4::identity();
    assert!(inverse(&mut out, &matrix));
    assert_eq!(out, expected);
    assert_eq!(matrix * out, SparseMatrix4::identity());
}

#[test]
fn test_integer_transforms_keep_determinant() {
    let scaling = SparseMatrix4i::scaling(Vector3::new([2, 2, 2]));
    assert_eq!(scaling.determinant(), 8);
    assert!(scaling.has_inverse());
    assert!(!SparseMatrix4i::default().has_inverse());

    let mut inverted = SparseMatrix4f::scaling(Vector3::new([2.0, 2.0, 2.0]));
    assert!(inverted.invert());
    assert_eq!(inverted, SparseMatrix4f::scaling(Vector3::new([0.5, 0.5, 0.5])));
}

#[test]
fn test_sparse_inverse_round_trip() {
    let mut rng = fastrand::Rng::with_seed(0x1417);
    for _ in 0..128 {
        let matrix = random_invertible_sparse(&mut rng);
        let inverse = matrix.inverse();

        assert_near((matrix * inverse).to_matrix(), Matrix4::identity(), 1e-9);
        assert_near((inverse * matrix).to_matrix(), Matrix4::identity(), 1e-9);

        assert_near(inverse.to_matrix(), matrix.to_matrix().inverse(), 1e-9);
    }
}

#[test]
fn test_singular_sparse_matrix_is_untouched() {
    let singular = SparseMatrix4::new([[1.0, 2.0, 3.0, 4.0], [2.0, 4.0, 6.0, 5.0], [0.0, 1.0, 1.0, 6.0]]);
    assert_eq!(singular.determinant(), 0.0);
    assert!(!singular.has_inverse());
    assert_eq!(singular.inverse_checked(), None);
    assert_eq!(singular.inverse(), singular);

    let sentinel = SparseMatrix4::new([[9.0; 4]; 3]);
    let mut out = sentinel;
    assert!(!inverse(&mut out, &singular));
    assert_eq!(out, sentinel);

    let mut matrix = singular;
    assert!(!matrix.invert());
    assert_eq!(matrix, singular);
}

#[test]
fn test_layout_arrays() {
    let matrix = SparseMatrix4::new([[1, 2, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12]]);

    for layout in Layout::ALL {
        let array = matrix.to_layout_array(layout);
        assert_eq!(SparseMatrix4::from_layout_array(layout, array), matrix, "{layout:?}");
    }

    let native = Layout::NATIVE;
    assert_eq!(matrix.to_layout_array(native), [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);

    let column_major = Layout::new(StorageOrder::ColumnMajor, VectorConvention::ColumnVectors);
    assert_eq!(
        matrix.to_layout_array(column_major),
        [1, 5, 9, 2, 6, 10, 3, 7, 11, 4, 8, 12],
    );

    // A column-major 4x3 transpose has the same memory order as the native 3x4 block.
    let transposed = Layout::new(StorageOrder::ColumnMajor, VectorConvention::RowVectors);
    assert_eq!(matrix.to_layout_array(transposed), matrix.to_layout_array(native));
}

#[test]
fn test_default_layout_arrays() {
    let matrix = SparseMatrix4::new([[1, 2, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12]]);

    let array = matrix.to_default_layout_array();
    assert_eq!(array, matrix.to_layout_array(Layout::DEFAULT));
    assert_eq!(SparseMatrix4::from_default_layout_array(array), matrix);

    #[cfg(not(any(feature = "column-major", feature = "row-vectors")))]
    assert_eq!(array, [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);

    #[cfg(all(feature = "column-major", not(feature = "row-vectors")))]
    assert_eq!(array, [1, 5, 9, 2, 6, 10, 3, 7, 11, 4, 8, 12]);
}

#[test]
fn test_dense_conversions() {
    let matrix = SparseMatrix4::new([[1, 2, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12]]);
    let dense = Matrix4::from(matrix);

    assert_eq!(dense.row(3), [0, 0, 0, 1]);
    assert_eq!(SparseMatrix4::try_from(dense), Ok(matrix));

    let transposed = matrix.transpose();
    assert_eq!(transposed.col(3), [0, 0, 0, 1]);
    assert_eq!(transposed.row(3), [4, 8, 12, 1]);
    assert_eq!(transposed, dense.transpose());

    let mut not_affine = dense;
    not_affine[(3, 0)] = 2;
    assert_eq!(SparseMatrix4::try_from(not_affine), Err(NotAffineError));
    assert_eq!(SparseMatrix4::try_from(Matrix4::<i32>::splat(0)), Err(NotAffineError));

    let block = Matrix3x4::from(matrix);
    assert_eq!(block, Matrix::new([[1, 2, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12]]));
    assert_eq!(SparseMatrix4::from(block), matrix);
}

#[cfg(any(feature = "std", feature = "libm"))]
#[test]
fn test_rotate() {
    use crate::rotation::{angle::Angle, quaternion::Quaternion};

    let quarter_turn = Quaternion::from_angle_axis(Angle::Degrees(90.0), Vector3::<f64>::Z);

    let mut matrix = SparseMatrix4::translation(Vector3::new([1.0, 0.0, 0.0]));
    matrix.rotate(quarter_turn);

    let point = matrix.transform_point(Vector3::X);
    assert_abs_diff_eq!(point.x, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(point.y, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(point.z, 0.0, epsilon = 1e-12);

    let rotation = SparseMatrix4::rotation(quarter_turn);
    assert_abs_diff_eq!(rotation.determinant(), 1.0, epsilon = 1e-12);
    assert_near(
        rotation.inverse().to_matrix(),
        rotation.transpose(),
        1e-12,
    );
}

#[cfg(feature = "mint")]
#[test]
fn test_mint_conversions() {
    let matrix = SparseMatrix4::new([[1, 2, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12]]);
    let mint: mint::RowMatrix3x4<i32> = matrix.into();
    assert_eq!(mint.z, mint::Vector4 { x: 9, y: 10, z: 11, w: 12 });
    assert_eq!(SparseMatrix4::from(mint), matrix);
}
