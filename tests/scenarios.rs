use numkern::linalg::{
    cholesky_in_place, inverse_from_lower_inverse, invert_lower_in_place, jacobi_eigen, pseudo_inverse, solve_equation,
};
use numkern::{Matrix, Vector};

const TOL: f64 = 1e-10;

fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
    assert!(
        (a - b).abs() < tol,
        "{}: {} vs {} (diff {})",
        msg,
        a,
        b,
        (a - b).abs()
    );
}

fn assert_mat_near(a: &Matrix<f64>, b: &Matrix<f64>, tol: f64, msg: &str) {
    assert_eq!((a.nrows(), a.ncols()), (b.nrows(), b.ncols()), "{}: shape", msg);
    for i in 0..a.nrows() {
        for j in 0..a.ncols() {
            assert_near(a[(i, j)], b[(i, j)], tol, &format!("{}[{},{}]", msg, i, j));
        }
    }
}

// ── Cholesky of the identity ────────────────────────────────────────

#[test]
fn identity_cholesky() {
    let mut a = Matrix::<f64>::eye(3);
    let ln_det = cholesky_in_place(&mut a).unwrap();
    assert_eq!(ln_det, 0.0);
    for i in 0..3 {
        assert_eq!(a[(i, i)], 1.0);
        for j in 0..i {
            assert_eq!(a[(i, j)], 0.0);
        }
    }

    let chol = Matrix::<f64>::eye(3).cholesky().unwrap();
    assert_mat_near(chol.l(), &Matrix::eye(3), TOL, "L");
    assert_eq!(chol.ln_det(), 0.0);
}

#[test]
fn cholesky_inverse_chain() {
    let a = Matrix::from_rows(3, 3, &[4.0, 2.0, 0.6, 2.0, 5.0, 1.0, 0.6, 1.0, 3.0]);
    let mut l = a.clone();
    let ln_det = cholesky_in_place(&mut l).unwrap();
    let ln_det_inv = invert_lower_in_place(&mut l).unwrap();
    assert_near(ln_det, ln_det_inv, 1e-12, "ln det from both passes");
    let inv = inverse_from_lower_inverse(&l);
    assert_mat_near(&(&a * &inv), &Matrix::eye(3), 1e-12, "A·A⁻¹");
}

// ── 2×2 symmetric eigenproblem ──────────────────────────────────────

#[test]
fn two_by_two_eigen() {
    let a = Matrix::from_rows(2, 2, &[2.0, 1.0, 1.0, 2.0]);
    let s = 1.0 / 2.0_f64.sqrt();

    let eig = a.eig_symmetric().unwrap();
    assert_near(eig.eigenvalues()[0], 1.0, TOL, "λ0");
    assert_near(eig.eigenvalues()[1], 3.0, TOL, "λ1");
    let v = eig.eigenvectors();
    // ±(1, −1)/√2 and ±(1, 1)/√2
    assert_near(v[(0, 0)].abs(), s, TOL, "v0");
    assert_near(v[(0, 0)] + v[(1, 0)], 0.0, TOL, "v0 direction");
    assert_near(v[(0, 1)].abs(), s, TOL, "v1");
    assert_near(v[(0, 1)] - v[(1, 1)], 0.0, TOL, "v1 direction");

    let mut w = a.clone();
    let jac = jacobi_eigen(&mut w).unwrap();
    let mut vals = jac.eigenvalues.clone().into_vec();
    vals.sort_by(|x, y| x.partial_cmp(y).unwrap());
    assert_near(vals[0], 1.0, TOL, "jacobi λ0");
    assert_near(vals[1], 3.0, TOL, "jacobi λ1");
}

// ── Rank-1 SVD and pseudo-inverse ───────────────────────────────────

#[test]
fn rank_one_svd_and_pseudo_inverse() {
    // A = u·vᵀ with u = (1, 2, 3), v = (1, 1)
    let a = Matrix::from_rows(3, 2, &[1.0, 1.0, 2.0, 2.0, 3.0, 3.0]);
    let svd = a.svd().unwrap();
    let w = svd.singular_values();
    assert_near(w[0], 28.0_f64.sqrt(), TOL, "σ1 = ‖u‖·‖v‖");
    assert!(w[1].abs() < 1e-12, "σ2 = {}", w[1]);
    assert_eq!(svd.rank(1e-10), 1);

    // A⁺ = v·uᵀ / (‖u‖²·‖v‖²) = v·uᵀ / 28
    let p = pseudo_inverse(&a, 1e-10).unwrap();
    let expected = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 1.0, 2.0, 3.0]) * (1.0 / 28.0);
    assert_mat_near(&p, &expected, 1e-12, "A⁺");
}

#[test]
fn least_squares_on_inconsistent_system() {
    let a = Matrix::from_rows(4, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0, 1.0, 3.0]);
    let b = Vector::from_slice(&[1.0, 2.0, 2.0, 4.0]);
    let x = solve_equation(&a, &b, 0.0).unwrap();
    // normal equations: [4 6; 6 14]·x = [9; 18]
    assert_near(x[0], 0.9, TOL, "intercept");
    assert_near(x[1], 0.9, TOL, "slope");
    let r = &(&a * &x) - &b;
    assert!(r.norm() > 0.1, "system is inconsistent");
}

// ── Procrustes recovers a rigid motion ──────────────────────────────

#[test]
fn procrustes_rigid_motion() {
    use numkern::analysis::{procrustes, ProcrustesSettings};

    let x = Matrix::from_rows(5, 3, &[
        0.0, 0.0, 0.0, //
        1.0, 0.0, 0.0, //
        0.0, 2.0, 0.0, //
        0.0, 0.0, 3.0, //
        1.0, 1.0, 1.0,
    ]);
    let theta = 0.7_f64;
    let (c, s) = (theta.cos(), theta.sin());
    // rotation about the z axis, acting on row vectors
    let r = Matrix::from_rows(3, 3, &[c, s, 0.0, -s, c, 0.0, 0.0, 0.0, 1.0]);
    let shift = [2.0, -1.0, 0.5];
    let mut y = &x * &r;
    for i in 0..y.nrows() {
        for j in 0..3 {
            y[(i, j)] += shift[j];
        }
    }

    let p = procrustes(&x, &y, &ProcrustesSettings::default()).unwrap();
    assert_mat_near(&p.rotation, &r, 1e-10, "rotation");
    assert_near(p.scale, 1.0, 1e-10, "scale");
    for j in 0..3 {
        assert_near(p.translation[j], shift[j], 1e-10, "translation");
    }
}
