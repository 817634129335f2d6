use numkern::analysis::{monotone_regression, nonnegative_least_squares, NnlsSettings};
use numkern::linalg::{jacobi_eigen, pseudo_inverse, solve_equation};
use numkern::{Matrix, Vector};
use proptest::prelude::*;

fn matrix(m: usize, n: usize) -> impl Strategy<Value = Matrix<f64>> {
    proptest::collection::vec(-10.0_f64..10.0, m * n).prop_map(move |data| Matrix::from_vec(m, n, data))
}

fn symmetric_matrix(n: usize) -> impl Strategy<Value = Matrix<f64>> {
    matrix(n, n).prop_map(|a| {
        let at = a.transpose();
        (&a + &at) * 0.5
    })
}

fn spd_matrix(n: usize) -> impl Strategy<Value = Matrix<f64>> {
    // AᵀA + nI is always SPD
    proptest::collection::vec(-5.0_f64..5.0, n * n).prop_map(move |data| {
        let a = Matrix::from_vec(n, n, data);
        &a.mul_tn(&a) + &(Matrix::eye(n) * n as f64)
    })
}

/// Rank-deficient m×n matrix as a product of m×r and r×n factors.
fn low_rank(m: usize, n: usize, r: usize) -> impl Strategy<Value = Matrix<f64>> {
    (matrix(m, r), matrix(r, n)).prop_map(|(b, c)| &b * &c)
}

fn max_abs_diff(a: &Matrix<f64>, b: &Matrix<f64>) -> f64 {
    (a - b).max_abs()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn cholesky_reconstructs(a in spd_matrix(4)) {
        let chol = a.cholesky().unwrap();
        let llt = chol.l().mul_nt(chol.l());
        let tol = 1e-9 * a.max_abs().max(1.0);
        prop_assert!(max_abs_diff(&llt, &a) < tol);

        let inv = chol.inverse();
        prop_assert!(max_abs_diff(&(&a * &inv), &Matrix::eye(4)) < 1e-8);
    }

    #[test]
    fn svd_reconstructs_and_is_orthogonal(a in matrix(6, 4)) {
        let svd = a.svd().unwrap();
        let tol = 1e-9 * a.max_abs().max(1.0);
        prop_assert!(max_abs_diff(&svd.reconstruct(), &a) < tol);
        prop_assert!(max_abs_diff(&svd.u().mul_tn(svd.u()), &Matrix::eye(4)) < 1e-10);
        prop_assert!(max_abs_diff(&svd.v().mul_tn(svd.v()), &Matrix::eye(4)) < 1e-10);

        let w = svd.singular_values();
        for k in 1..w.len() {
            prop_assert!(w[k - 1] >= w[k]);
            prop_assert!(w[k] >= 0.0);
        }
    }

    #[test]
    fn wide_svd_reconstructs(a in matrix(3, 5)) {
        let svd = a.svd().unwrap();
        let tol = 1e-9 * a.max_abs().max(1.0);
        prop_assert!(max_abs_diff(&svd.reconstruct(), &a) < tol);
    }

    #[test]
    fn eigen_methods_agree(a in symmetric_matrix(5)) {
        let eig = a.eig_symmetric().unwrap();
        let tol = 1e-9 * a.max_abs().max(1.0);
        for k in 0..5 {
            let v = eig.eigenvectors().column(k);
            let r = &(&a * &v) - &(&v * eig.eigenvalues()[k]);
            prop_assert!(r.norm() < tol);
        }

        let mut w = a.clone();
        let jac = jacobi_eigen(&mut w).unwrap();
        let mut vals = jac.eigenvalues.clone().into_vec();
        vals.sort_by(|x, y| x.partial_cmp(y).unwrap());
        for k in 0..5 {
            prop_assert!((vals[k] - eig.eigenvalues()[k]).abs() < tol);
            let v = jac.eigenvectors.column(k);
            let r = &(&a * &v) - &(&v * jac.eigenvalues[k]);
            prop_assert!(r.norm() < tol);
        }
    }

    #[test]
    fn pseudo_inverse_identities(a in low_rank(5, 4, 2)) {
        let p = pseudo_inverse(&a, 1e-10).unwrap();
        let scale = a.max_abs().max(1.0);
        let apa = &(&a * &p) * &a;
        prop_assert!(max_abs_diff(&apa, &a) < 1e-7 * scale);
        let pap = &(&p * &a) * &p;
        prop_assert!(max_abs_diff(&pap, &p) < 1e-7 * p.max_abs().max(1.0));
        prop_assert!((&a * &p).is_symmetric(1e-7));
        prop_assert!((&p * &a).is_symmetric(1e-7));
    }

    #[test]
    fn consistent_solve_has_small_residual(a in matrix(4, 4), x in proptest::collection::vec(-5.0_f64..5.0, 4)) {
        let x = Vector::from_vec(x);
        let b = &a * &x;
        let sol = solve_equation(&a, &b, 0.0).unwrap();
        let r = &(&a * &sol) - &b;
        prop_assert!(r.norm() < 1e-7 * b.norm().max(1.0));
    }

    #[test]
    fn nnls_is_feasible_and_bounded(a in matrix(6, 3), b in proptest::collection::vec(-10.0_f64..10.0, 6)) {
        let b = Vector::from_vec(b);
        let x = nonnegative_least_squares(&a, &b, &NnlsSettings::default()).unwrap();
        prop_assert!(x.iter().all(|&v| v >= 0.0));

        let x_ls = solve_equation(&a, &b, 0.0).unwrap();
        let r = (&(&a * &x) - &b).norm();
        let r_ls = (&(&a * &x_ls) - &b).norm();
        prop_assert!(r + 1e-9 >= r_ls);
        // never worse than doing nothing
        prop_assert!(r <= b.norm() + 1e-9);
    }

    #[test]
    fn monotone_regression_is_non_decreasing(x in proptest::collection::vec(-100.0_f64..100.0, 0..40)) {
        let x = Vector::from_vec(x);
        let y = monotone_regression(&x);
        prop_assert_eq!(y.len(), x.len());
        for k in 1..y.len() {
            prop_assert!(y[k - 1] <= y[k] + 1e-12);
        }
        // pooling preserves the sum
        prop_assert!((y.sum() - x.sum()).abs() < 1e-8);
    }

    #[test]
    fn monotone_regression_fixes_sorted_input(mut x in proptest::collection::vec(-100.0_f64..100.0, 0..40)) {
        x.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let v = Vector::from_vec(x.clone());
        let y = monotone_regression(&v);
        prop_assert_eq!(y.as_slice(), x.as_slice());
    }
}
