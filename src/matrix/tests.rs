// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    error::ElementCountError,
    layout::{Layout, StorageOrder, VectorConvention},
    matrix::{Matrix, Matrix2, Matrix3, Matrix4, determinant::Determinant, inverse::Inverse},
    utils::num::Zero,
    vector::{Vector, Vector3},
};
use approx::{assert_abs_diff_eq, assert_relative_eq};

fn assert_near<const ROWS: usize, const COLS: usize>(
    lhs: Matrix<f64, ROWS, COLS>,
    rhs: Matrix<f64, ROWS, COLS>,
    epsilon: f64,
) {
    for (l, r) in lhs.iter().zip(rhs.iter()) {
        assert_abs_diff_eq!(*l, *r, epsilon = epsilon);
    }
}

fn random_matrix<const N: usize>(rng: &mut fastrand::Rng) -> Matrix<f64, N, N> {
    Matrix::from_fn(|_, _| rng.f64() * 20.0 - 10.0)
}

/// A random, diagonally dominant matrix, which is always well conditioned.
fn random_invertible_matrix<const N: usize>(rng: &mut fastrand::Rng) -> Matrix<f64, N, N> {
    let dominance = Matrix::identity() * (N as f64 * 10.0);
    random_matrix(rng) + dominance
}

#[test]
fn test_matrix_access() {
    #[rustfmt::skip]
    let mut matrix = Matrix::new([
        [01, 02, 03, 04, 05],
        [06, 07, 08, 09, 10],
        [11, 12, 13, 14, 15],
        [16, 17, 18, 19, 20],
    ]);

    assert_eq!(matrix.row(2), [11, 12, 13, 14, 15]);
    assert_eq!(matrix.col(4), [05, 10, 15, 20]);
    assert_eq!(matrix[(3, 1)], 17);
    assert_eq!(matrix[3][1], 17);
    assert_eq!(*matrix.element(7), 8);
    assert_eq!(matrix.get(3, 4), Some(&20));
    assert_eq!(matrix.get(4, 0), None);
    assert_eq!(matrix.get(0, 5), None);

    matrix[(0, 0)] = 99;
    *matrix.element_mut(19) = 42;
    assert_eq!(matrix.as_slice()[0], 99);
    assert_eq!(matrix[3][4], 42);

    matrix.set_row(1, [0; 5]);
    matrix.set_col(2, [7; 4]);
    assert_eq!(matrix.row(1), [0, 0, 7, 0, 0]);
    assert_eq!(matrix.col(2), [7, 7, 7, 7]);

    assert_eq!(matrix.try_set_row(4, [1; 5]), Err([1; 5]));
    assert_eq!(matrix.try_set_col(5, [2; 4]), Err([2; 4]));
    assert_eq!(matrix.try_set_col(0, [3; 4]), Ok(()));
    assert_eq!(matrix.col(0), [3; 4]);
}

#[test]
#[should_panic]
fn test_element_out_of_range() {
    let matrix = Matrix2::new([[1, 2], [3, 4]]);
    let _ = matrix.element(4);
}

#[test]
fn test_from_elements() {
    let matrix = Matrix::<i32, 3, 2>::from_elements(1..=6);
    assert_eq!(matrix, Ok(Matrix::new([[1, 2], [3, 4], [5, 6]])));

    assert_eq!(
        Matrix::<i32, 3, 2>::from_elements(1..=5),
        Err(ElementCountError {
            expected: 6,
            found: 5
        })
    );
    assert_eq!(
        Matrix::<i32, 3, 2>::from_elements(1..=9),
        Err(ElementCountError {
            expected: 6,
            found: 7
        })
    );
    assert_eq!(
        Matrix::<i32, 2, 2>::from_elements(core::iter::repeat(1)),
        Err(ElementCountError {
            expected: 4,
            found: 5
        })
    );

    let mut elements = 1..;
    assert!(Matrix::<i32, 2, 2>::from_elements(elements.by_ref()).is_err());
    assert_eq!(elements.next(), Some(6));

    let elements = [1.0, 0.0, 0.0, 1.0, 2.0];
    assert_eq!(Matrix2::try_from(&elements[..4]), Ok(Matrix2::identity()));
    assert_eq!(
        Matrix2::<f64>::try_from(&elements[..3]),
        Err(ElementCountError {
            expected: 4,
            found: 3
        })
    );
    assert_eq!(
        Matrix2::<f64>::try_from(&elements[..]),
        Err(ElementCountError {
            expected: 4,
            found: 5
        })
    );
}

#[test]
fn test_from_elements_drops_partial_matrix() {
    use std::rc::Rc;

    let counter = Rc::new(());
    let elements: Vec<_> = (0..5).map(|_| Rc::clone(&counter)).collect();
    assert_eq!(Rc::strong_count(&counter), 6);

    let too_few = Matrix::<Rc<()>, 3, 2>::from_elements(elements);
    assert!(too_few.is_err());
    assert_eq!(Rc::strong_count(&counter), 1);

    let elements: Vec<_> = (0..7).map(|_| Rc::clone(&counter)).collect();
    let too_many = Matrix::<Rc<()>, 3, 2>::from_elements(elements);
    assert!(too_many.is_err());
    assert_eq!(Rc::strong_count(&counter), 1);

    let elements: Vec<_> = (0..6).map(|_| Rc::clone(&counter)).collect();
    let matrix = Matrix::<Rc<()>, 3, 2>::from_elements(elements);
    assert!(matrix.is_ok());
    assert_eq!(Rc::strong_count(&counter), 7);

    drop(matrix);
    assert_eq!(Rc::strong_count(&counter), 1);
}

#[test]
fn test_storage_orders() {
    #[rustfmt::skip]
    let matrix = Matrix::new([
        [1, 2, 3, 4],
        [5, 6, 7, 8],
        [9, 10, 11, 12],
    ]);

    let mut column_major = [0; 12];
    assert_eq!(
        matrix.write_to_slice(StorageOrder::ColumnMajor, &mut column_major),
        Ok(())
    );
    assert_eq!(column_major, [1, 5, 9, 2, 6, 10, 3, 7, 11, 4, 8, 12]);

    let mut row_major = [0; 12];
    assert_eq!(
        matrix.write_to_slice(StorageOrder::RowMajor, &mut row_major),
        Ok(())
    );
    assert_eq!(&row_major[..], matrix.as_slice());

    for order in [StorageOrder::RowMajor, StorageOrder::ColumnMajor] {
        let mut buffer = [0; 12];
        assert_eq!(matrix.write_to_slice(order, &mut buffer), Ok(()));
        assert_eq!(Matrix::from_slice_with(order, &buffer), Ok(matrix));

        for row in 0..3 {
            for col in 0..4 {
                let index = Matrix::<i32, 3, 4>::linear_index(order, row, col);
                assert_eq!(buffer[index], matrix[(row, col)]);
            }
        }
    }

    let mut too_short = [0; 11];
    assert_eq!(
        matrix.write_to_slice(StorageOrder::RowMajor, &mut too_short),
        Err(ElementCountError {
            expected: 12,
            found: 11
        })
    );
    assert!(Matrix::<i32, 3, 4>::from_slice_with(StorageOrder::ColumnMajor, &[0; 13]).is_err());
}

#[test]
fn test_default_layout_adapters() {
    #[rustfmt::skip]
    let matrix = Matrix::new([
        [1, 2, 3, 4],
        [5, 6, 7, 8],
        [9, 10, 11, 12],
    ]);

    let mut expected = [0; 12];
    let written = match Layout::DEFAULT.convention {
        VectorConvention::ColumnVectors => {
            matrix.write_to_slice(Layout::DEFAULT.order, &mut expected)
        }
        VectorConvention::RowVectors => {
            matrix.transpose().write_to_slice(Layout::DEFAULT.order, &mut expected)
        }
    };
    assert_eq!(written, Ok(()));

    let mut buffer = [0; 12];
    assert_eq!(matrix.write_to_slice_default(&mut buffer), Ok(()));
    assert_eq!(buffer, expected);
    assert_eq!(Matrix::from_slice_default(&buffer), Ok(matrix));

    if Layout::DEFAULT == Layout::NATIVE {
        assert_eq!(&buffer[..], matrix.as_slice());
    }

    assert!(matrix.write_to_slice_default(&mut [0; 13]).is_err());
    assert!(Matrix::<i32, 3, 4>::from_slice_default(&[0; 11]).is_err());
}

#[test]
fn test_matrix_multiply() {
    #[rustfmt::skip]
    let m1 = Matrix4::new([
        [15, 07, 09, 10],
        [02, 03, 03, 08],
        [08, 10, 02, 03],
        [03, 03, 04, 08],
    ]);

    #[rustfmt::skip]
    let m2 = Matrix4::new([
        [03, 10, 12, 18],
        [12, 01, 04, 09],
        [09, 10, 12, 02],
        [03, 12, 04, 10],
    ]);

    #[rustfmt::skip]
    let result = Matrix4::new([
        [240, 367, 356, 451],
        [093, 149, 104, 149],
        [171, 146, 172, 268],
        [105, 169, 128, 169],
    ]);

    assert_eq!(m1 * m2, result);

    let mut m3 = m1;
    m3 *= m2;
    assert_eq!(m3, result);

    assert_eq!(
        Matrix4::<f32>::identity() * Matrix4::identity(),
        Matrix4::identity()
    );

    let m0 = Matrix::new([[1, 2, 3]]);
    let m1 = Matrix::new([[4], [5], [6]]);

    assert_eq!(m0 * m1, Matrix::new([[32]]));

    #[rustfmt::skip]
    assert_eq!(m1 * m0, Matrix::new([
        [04, 08, 12],
        [05, 10, 15],
        [06, 12, 18],
    ]));
}

#[test]
fn test_matrix_vector_multiply() {
    #[rustfmt::skip]
    let matrix = Matrix::new([
        [1, 2, 3],
        [4, 5, 6],
    ]);

    assert_eq!(matrix * Vector::new([1, 0, -1]), Vector::new([-2, -2]));
    assert_eq!(Vector::new([1, 1]) * matrix, Vector::new([5, 7, 9]));

    let point = Vector3::new([3.0, -2.0, 7.5]);
    assert_eq!(Matrix3::<f64>::identity() * point, point);
    assert_eq!(point * Matrix3::<f64>::identity(), point);

    let scale = Matrix3::identity() * 2.0;
    assert_eq!(scale.premul(Vector3::X), Vector3::new([2.0, 0.0, 0.0]));
    assert_eq!(scale.premul(point), point * 2.0);
    assert_eq!(matrix.premul(Vector::new([1, 1])), Vector::new([5, 7, 9]));
}

#[test]
fn test_matrix_add() {
    // Taken from https://en.wikipedia.org/wiki/Matrix_addition
    #[rustfmt::skip]
    let m1 = Matrix::new([
        [1, 3],
        [1, 0],
        [1, 2],
    ]);

    #[rustfmt::skip]
    let m2 = Matrix::new([
        [0, 0],
        [7, 5],
        [2, 1],
    ]);

    #[rustfmt::skip]
    let expected_add_result = Matrix::new([
        [1, 3],
        [8, 5],
        [3, 3],
    ]);

    #[rustfmt::skip]
    let expected_sub_result = Matrix::new([
        [01, 03],
        [-6, -5],
        [-1, 01],
    ]);

    assert_eq!(m1 + m2, expected_add_result);
    assert_eq!(m1 - m2, expected_sub_result);

    let mut m3 = m1;
    m3 += m2;
    assert_eq!(m3, expected_add_result);
    m3 -= m2;
    assert_eq!(m3, m1);
    assert_eq!(-m1 + m1, Matrix::ZERO);
}

#[test]
fn test_scalar_multiply() {
    let matrix = Matrix::new([[1, -2], [3, 4]]);
    assert_eq!(matrix * 3, Matrix::new([[3, -6], [9, 12]]));
    assert_eq!(3 * matrix, matrix * 3);

    let mut matrix = Matrix::new([[2.0, 4.0], [6.0, 8.0]]);
    matrix /= 2.0;
    assert_eq!(matrix, Matrix::new([[1.0, 2.0], [3.0, 4.0]]));
    matrix *= 0.5;
    assert_eq!(matrix, Matrix::new([[0.5, 1.0], [1.5, 2.0]]));
}

#[test]
fn test_identity_and_reset() {
    let mut matrix = Matrix3::new([[1, 2, 3], [4, 5, 6], [7, 8, 9]]);

    matrix.load_identity();
    assert_eq!(matrix, Matrix3::identity());

    matrix.reset();
    assert_eq!(matrix, Matrix3::ZERO);
    assert_eq!(Matrix3::<i32>::default(), Matrix3::ZERO);
    assert_eq!(Matrix::<u8, 2, 5>::splat(0), Matrix::ZERO);
}

#[test]
fn test_transpose() {
    #[rustfmt::skip]
    let mut mat = Matrix::new([
        [1, 2, 3],
        [4, 5, 6],
        [7, 8, 9],
    ]);

    #[rustfmt::skip]
    let transposed = Matrix::new([
        [1, 4, 7],
        [2, 5, 8],
        [3, 6, 9],
    ]);

    assert_eq!(mat.transpose(), transposed);
    mat.transpose_in_place();
    assert_eq!(mat, transposed);

    #[rustfmt::skip]
    let mat = Matrix::new([
        [1, 2],
        [3, 4],
        [5, 6],
    ]);
    #[rustfmt::skip]
    let transposed = Matrix::new([
        [1, 3, 5],
        [2, 4, 6],
    ]);

    assert_eq!(mat.transpose(), transposed);
    assert_eq!(mat.transpose().transpose(), mat);

    let mut mat = Matrix::new([[1]]);
    mat.transpose_in_place();
    assert_eq!(mat[0][0], 1);

    let mat = Matrix::new([[1, 2, 3, 4]]);
    assert_eq!(mat.transpose(), Matrix::new([[1], [2], [3], [4]]));

    let mut rng = fastrand::Rng::with_seed(0x7a05);
    for _ in 0..20 {
        let mat = random_matrix::<5>(&mut rng);
        let mut in_place = mat;
        in_place.transpose_in_place();
        assert_eq!(in_place, mat.transpose());
        assert_eq!(mat.transpose().transpose(), mat);
    }
}

#[test]
fn test_determinant() {
    let mat = Matrix::new([[25]]);
    assert_eq!(mat.determinant(), 25);

    // 2x2 example taken from https://www.mathsisfun.com/algebra/matrix-determinant.html
    #[rustfmt::skip]
    let mat = Matrix::new([
        [3, 8],
        [4, 6],
    ]);

    assert_eq!(mat.determinant(), -14);

    // 3x3 examples taken from https://www.geeksforgeeks.org/maths/determinant-of-3x3-matrix/
    #[rustfmt::skip]
    let mat = Matrix::new([
        [1, 2, 1],
        [0, 3, 0],
        [4, 1, 2],
    ]);

    assert_eq!(mat.determinant(), -6);

    #[rustfmt::skip]
    let mat = Matrix::new([
        [3, 1, 2],
        [0, 2, 5],
        [2, 0, 4],
    ]);

    assert_eq!(mat.determinant(), 26);

    #[rustfmt::skip]
    let mat = Matrix::new([
        [00, -1, 2],
        [03, 02, 0],
        [-1, 03, 2],
    ]);

    assert_eq!(mat.determinant(), 28);

    #[rustfmt::skip]
    let mat = Matrix::new([
        [02, 01, 3, 4],
        [00, -1, 2, 1],
        [03, 02, 0, 5],
        [-1, 03, 2, 1],
    ]);

    assert_eq!(mat.determinant(), 35);
    assert_eq!(Determinant::determinant(&mat), 35);

    #[rustfmt::skip]
    let mat = Matrix::new([
        [02, 01, 00, 3],
        [04, -1, 02, 0],
        [-3, 02, 01, 5],
        [01, 00, -2, 3],
    ]);

    assert_eq!(mat.determinant(), -85);

    assert_eq!(Matrix::<i32, 4, 4>::identity().determinant(), 1);
    assert_eq!(Matrix::<i32, 6, 6>::identity().determinant(), 1);

    #[rustfmt::skip]
    let mat = Matrix::new([
        [2, 0, 0, 0, 1],
        [0, 3, 0, 0, 0],
        [0, 0, 1, 0, 0],
        [0, 0, 0, 4, 0],
        [1, 0, 0, 0, 1],
    ]);

    assert_eq!(mat.determinant(), 12);
}

#[test]
fn test_determinant_of_product() {
    let mut rng = fastrand::Rng::with_seed(0xde7);

    for _ in 0..50 {
        let (a, b) = (random_matrix::<3>(&mut rng), random_matrix::<3>(&mut rng));
        let expected = a.determinant() * b.determinant();
        assert_relative_eq!((a * b).determinant(), expected, epsilon = 1e-6, max_relative = 1e-7);

        let (a, b) = (random_matrix::<4>(&mut rng), random_matrix::<4>(&mut rng));
        let expected = a.determinant() * b.determinant();
        assert_relative_eq!((a * b).determinant(), expected, epsilon = 1e-5, max_relative = 1e-7);

        let (a, b) = (random_matrix::<5>(&mut rng), random_matrix::<5>(&mut rng));
        let expected = a.determinant() * b.determinant();
        assert_relative_eq!((a * b).determinant(), expected, epsilon = 1e-4, max_relative = 1e-7);
    }
}

#[test]
fn test_closed_forms_match_cofactor_expansion() {
    let mut rng = fastrand::Rng::with_seed(0xc0fac);

    for _ in 0..50 {
        let m3 = random_matrix::<3>(&mut rng);
        assert_relative_eq!(m3.determinant(), m3.det_laplace(3), epsilon = 1e-9, max_relative = 1e-9);

        let m4 = random_matrix::<4>(&mut rng);
        assert_relative_eq!(m4.determinant(), m4.det_laplace(4), epsilon = 1e-9, max_relative = 1e-9);
    }
}

#[test]
fn test_cofactor_shifted() {
    #[rustfmt::skip]
    let mat = Matrix::new([
        [01, 02, 03, 04],
        [05, 06, 07, 08],
        [09, 10, 11, 12],
        [13, 14, 15, 16],
    ]);

    #[rustfmt::skip]
    assert_eq!(mat.cofactor_shifted(1, 2), Matrix::new([
        [01, 02, 04, 00],
        [09, 10, 12, 00],
        [13, 14, 16, 00],
        [00, 00, 00, 00],
    ]));
}

#[test]
fn test_adjoint() {
    #[rustfmt::skip]
    let mat = Matrix::new([
        [03, 6],
        [-4, 8],
    ]);

    #[rustfmt::skip]
    let expected_adjoint = Matrix::new([
        [8, -6],
        [4, 03],
    ]);

    assert_eq!(mat.adjoint(), expected_adjoint);

    #[rustfmt::skip]
    let mat = Matrix::new([
        [1, 2, 3],
        [4, 5, 6],
        [7, 8, 9],
    ]);

    #[rustfmt::skip]
    let expected_adjoint = Matrix::new([
        [-3, 006, -3],
        [06, -12, 06],
        [-3, 006, -3],
    ]);

    assert_eq!(mat.adjoint(), expected_adjoint);

    #[rustfmt::skip]
    let mat = Matrix::new([
        [05, -2, 02, 7],
        [01, 00, 00, 3],
        [-3, 01, 05, 0],
        [03, -1, -9, 4],
    ]);

    #[rustfmt::skip]
    let expected_adjoint = Matrix::new([
        [-12, 076, -60, -36],
        [-56, 208, -82, -58],
        [004, 004, -02, -10],
        [004, 004, 020, 012],
    ]);

    assert_eq!(mat.adjoint(), expected_adjoint);
    assert_eq!(Matrix::new([[7]]).adjoint(), Matrix::new([[1]]));
}

#[test]
fn test_inverse() {
    assert_eq!(Matrix3::<f64>::identity().determinant(), 1.0);
    assert_eq!(
        Matrix3::<f64>::identity().inverse_checked(),
        Some(Matrix3::identity())
    );

    let scaled = Matrix2::new([[2.0, 0.0], [0.0, 2.0]]);
    assert_eq!(scaled.determinant(), 4.0);
    assert_eq!(scaled.inverse(), Matrix2::identity() * 0.5);

    let mut out = Matrix2::ZERO;
    assert!(Inverse::inverse_into(&scaled, &mut out));
    assert!(crate::inverse(&mut out, &scaled));
    assert_eq!(out, Matrix2::new([[0.5, 0.0], [0.0, 0.5]]));

    assert_eq!(Matrix::new([[4.0]]).inverse_checked(), Some(Matrix::new([[0.25]])));
    assert_eq!(Matrix4::<f64>::ZERO.inverse_checked(), None);
}

#[test]
fn test_integer_matrices_keep_adjugate() {
    let scaled = Matrix2::new([[2, 0], [0, 2]]);
    assert!(scaled.has_inverse());
    assert_eq!(scaled.determinant(), 4);
    assert_eq!(scaled.adjoint(), Matrix2::new([[2, 0], [0, 2]]));
    assert!(!Matrix2::new([[1, 2], [2, 4]]).has_inverse());

    let mut inverted = Matrix2::new([[2.0_f32, 0.0], [0.0, 2.0]]);
    assert!(inverted.invert());
    assert_eq!(inverted, Matrix2::new([[0.5, 0.0], [0.0, 0.5]]));
}

#[test]
fn test_inverse_round_trip() {
    fn check<const N: usize>(rng: &mut fastrand::Rng) {
        let matrix = random_invertible_matrix::<N>(rng);
        let inverse = matrix.inverse_checked().expect("diagonally dominant matrices are invertible");

        assert_near(matrix * inverse, Matrix::identity(), 1e-9);
        assert_near(inverse * matrix, Matrix::identity(), 1e-9);
        assert_near(inverse.inverse(), matrix, 1e-6);
    }

    let mut rng = fastrand::Rng::with_seed(0x1a7e);
    for _ in 0..50 {
        check::<2>(&mut rng);
        check::<3>(&mut rng);
        check::<4>(&mut rng);
        check::<5>(&mut rng);
    }
}

#[test]
fn test_singular_matrix_is_untouched() {
    #[rustfmt::skip]
    let singular = Matrix3::new([
        [1.0, 2.0, 3.0],
        [0.0, 0.0, 0.0],
        [7.0, 8.0, 9.0],
    ]);

    assert!(!singular.has_inverse());
    assert_eq!(singular.inverse_checked(), None);
    assert_eq!(singular.inverse(), singular);

    let mut inverted = singular;
    assert!(!inverted.invert());
    assert_eq!(inverted, singular);

    let mut out = Matrix3::splat(-1.0);
    assert!(!singular.inverse_into(&mut out));
    assert_eq!(out, Matrix3::splat(-1.0));

    let linearly_dependent = Matrix4::from_fn(|row, col| (row * 4 + col) as f64);
    assert!(!linearly_dependent.has_inverse());

    let mut inverted = Matrix::<f64, 5, 5>::ZERO;
    assert!(!inverted.invert());
    assert_eq!(inverted, Matrix::ZERO);
}

#[test]
fn test_invert_in_place() {
    #[rustfmt::skip]
    let mut matrix = Matrix4::new([
        [2.0, 0.0, 0.0, 1.0],
        [0.0, 4.0, 0.0, 2.0],
        [0.0, 0.0, 8.0, 3.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    assert!(matrix.invert());

    #[rustfmt::skip]
    assert_eq!(matrix, Matrix4::new([
        [0.5, 0.0, 0.0, -0.5],
        [0.0, 0.25, 0.0, -0.5],
        [0.0, 0.0, 0.125, -0.375],
        [0.0, 0.0, 0.0, 1.0],
    ]));
}

#[cfg(feature = "mint")]
#[test]
fn test_mint_conversions() {
    use mint::{ColumnMatrix2x3, RowMatrix2x3};

    let mint_matrix = ColumnMatrix2x3 {
        x: [1.0, 2.0].into(),
        y: [3.0, 4.0].into(),
        z: [5.0, 6.0].into(),
    };

    let matrix: Matrix<f64, 2, 3> = mint_matrix.into();

    assert_eq!(matrix, Matrix::new([[1.0, 3.0, 5.0], [2.0, 4.0, 6.0],]));
    assert_eq!(matrix, mint_matrix);

    let row_matrix: RowMatrix2x3<f64> = matrix.into();
    assert_eq!(matrix, row_matrix);
    assert_eq!(Matrix::from(row_matrix), matrix);
}
