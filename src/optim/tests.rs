use super::*;
use crate::linalg::LinalgError;

const TOL: f64 = 1e-8;

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

// ═══════════════════════════════════════════════════════════════════
// Newton-bisection
// ═══════════════════════════════════════════════════════════════════

#[test]
fn newton_bisect_sqrt2() {
    let r = newton_bisect(|x| (x * x - 2.0, 2.0 * x), 0.0, 2.0, &RootSettings::default()).unwrap();
    assert_near(r.x, core::f64::consts::SQRT_2, 1e-12, "sqrt2");
    assert!(r.iterations < 20);
}

#[test]
fn newton_bisect_reversed_bracket() {
    // f(a) > 0 > f(b)
    let r = newton_bisect(|x: f64| (1.0 - x, -1.0), 3.0, -1.0, &RootSettings::default()).unwrap();
    assert_near(r.x, 1.0, TOL, "root");
}

#[test]
fn newton_bisect_zero_derivative_falls_back() {
    // derivative vanishes at the midpoint 0; bisection takes over
    let f = |x: f64| (x * x * x - 1.0, 3.0 * x * x);
    let r = newton_bisect(f, -2.0, 2.0, &RootSettings::default()).unwrap();
    assert_near(r.x, 1.0, TOL, "cube root of 1");
}

#[test]
fn newton_bisect_pole_outside_bracket() {
    // secular-equation shape: increasing, pole at -1
    let f = |mu: f64| {
        let d = 1.0 + mu;
        (mu - 2.0 * (4.0 / (d * d) - 1.0), 1.0 + 16.0 / (d * d * d))
    };
    let r = newton_bisect(f, -0.9, 10.0, &RootSettings::default()).unwrap();
    assert!(r.fx.abs() < 1e-10, "residual {}", r.fx);
    assert!(r.x > -0.9 && r.x < 10.0);
}

#[test]
fn newton_bisect_first_step_bisects() {
    // Newton from the midpoint 4.5 overshoots far left of the bracket
    let f = |x: f64| (x.atan(), 1.0 / (1.0 + x * x));
    let r = newton_bisect(f, -1.0, 10.0, &RootSettings::default()).unwrap();
    assert_near(r.x, 0.0, TOL, "root of atan");
    assert!(r.fx.abs() < 1e-10, "residual {}", r.fx);
    assert!(r.iterations > 1);
}

#[test]
fn newton_bisect_midpoint_root() {
    let r = newton_bisect(|x: f64| (x - 1.0, 1.0), 0.0, 2.0, &RootSettings::default()).unwrap();
    assert_eq!(r.x, 1.0);
    assert_eq!(r.fx, 0.0);
}

#[test]
fn newton_bisect_endpoint_root() {
    let r = newton_bisect(|x: f64| (x, 1.0), 0.0, 1.0, &RootSettings::default()).unwrap();
    assert_eq!(r.x, 0.0);
    assert_eq!(r.iterations, 0);
}

#[test]
fn newton_bisect_not_bracketed() {
    let r = newton_bisect(|x: f64| (x * x + 1.0, 2.0 * x), -1.0, 1.0, &RootSettings::default());
    assert_eq!(r.unwrap_err(), OptimError::BracketInvalid);
}

#[test]
fn newton_bisect_f32() {
    let r = newton_bisect(|x: f32| (x * x - 2.0, 2.0 * x), 0.0, 2.0, &RootSettings::default()).unwrap();
    assert!((r.x - core::f32::consts::SQRT_2).abs() < 1e-5);
}

// ═══════════════════════════════════════════════════════════════════
// Ridders
// ═══════════════════════════════════════════════════════════════════

#[test]
fn ridders_cos_fixed_point() {
    let r = ridders(|x: f64| x.cos() - x, 0.0, 1.0, &RootSettings::default()).unwrap();
    assert_near(r.x, 0.7390851332151607, 1e-12, "dottie number");
}

#[test]
fn ridders_cubic() {
    let r = ridders(|x: f64| x * x * x - x - 2.0, 1.0, 2.0, &RootSettings::default()).unwrap();
    assert_near(r.x, 1.5213797068045676, 1e-10, "cubic root");
    assert!(r.evals < 40);
}

#[test]
fn ridders_not_bracketed() {
    let r = ridders(|x: f64| x * x + 1.0, -1.0, 1.0, &RootSettings::default());
    assert_eq!(r.unwrap_err(), OptimError::BracketInvalid);
}

#[test]
fn ridders_max_iterations() {
    let settings = RootSettings {
        x_tol: 0.0,
        f_tol: 0.0,
        max_iter: 2,
    };
    let r = ridders(|x: f64| x.exp() - 10.0, 0.0, 5.0, &settings);
    assert_eq!(r.unwrap_err(), OptimError::MaxIterations);
}

// ═══════════════════════════════════════════════════════════════════
// Quadratic equation
// ═══════════════════════════════════════════════════════════════════

#[test]
fn quadratic_two_roots_sorted() {
    match solve_quadratic(2.0_f64, 2.0, -12.0) {
        QuadraticRoots::Two(x1, x2) => {
            assert_near(x1, -3.0, 1e-14, "x1");
            assert_near(x2, 2.0, 1e-14, "x2");
        }
        r => panic!("expected two roots, got {:?}", r),
    }
    // b = 0: symmetric pair
    assert_eq!(solve_quadratic(1.0_f64, 0.0, -4.0), QuadraticRoots::Two(-2.0, 2.0));
}

#[test]
fn quadratic_small_root_without_cancellation() {
    // x² − 1e8·x + 1 = 0 has a root near 1e-8
    let r = solve_quadratic(1.0_f64, -1e8, 1.0);
    match r {
        QuadraticRoots::Two(x1, x2) => {
            assert!((x1 - 1e-8).abs() < 1e-20, "x1 = {}", x1);
            assert!((x2 - 1e8).abs() < 1e-6, "x2 = {}", x2);
        }
        _ => panic!("expected two roots, got {:?}", r),
    }
}

#[test]
fn quadratic_degenerate_cases() {
    assert_eq!(solve_quadratic(1.0_f64, -2.0, 1.0), QuadraticRoots::One(1.0));
    assert_eq!(solve_quadratic(0.0_f64, 2.0, -3.0), QuadraticRoots::One(1.5));
    assert_eq!(solve_quadratic(0.0_f64, 0.0, 1.0), QuadraticRoots::None);
    let none = solve_quadratic(1.0_f64, 1.0, 1.0);
    assert_eq!(none, QuadraticRoots::None);
    assert_eq!(none.count(), 0);
    assert_eq!(solve_quadratic(1.0_f32, -3.0, 2.0).count(), 2);
}

// ═══════════════════════════════════════════════════════════════════
// Error mapping
// ═══════════════════════════════════════════════════════════════════

#[test]
fn optim_error_converts_to_linalg_error() {
    assert_eq!(LinalgError::from(OptimError::BracketInvalid), LinalgError::RootNotBracketed);
    assert_eq!(LinalgError::from(OptimError::MaxIterations), LinalgError::ConvergenceFailure);
    assert_eq!(LinalgError::from(OptimError::NotFinite), LinalgError::ConvergenceFailure);
}
