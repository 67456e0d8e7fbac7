//! End-to-end pricing of the reference scenario.
//!
//! `t = 0`, `T1 = 0.5`, `T2 = 1`, `α = 0.10`, `σ = 0.09`, `θ = 0.2`,
//! `r0 = 0.05`, `dt = 0.01`, `K = 1.25`.

use approx::assert_abs_diff_eq;
use shortrate::core::{Error, NumericWarning};
use shortrate::models::{
    AffineAnalytics, HullWhite, ModelParameters, PricingContext, ShortRateModel, Vasicek,
};
use shortrate::pricingengines::{CapletFloorletPricer, ForwardOptionPricer};

const T1: f64 = 0.5;
const T2: f64 = 1.0;
const DT: f64 = 0.01;

fn params() -> ModelParameters {
    ModelParameters::new(0.10, 0.09, 0.2, 0.05).unwrap()
}

fn context() -> PricingContext {
    PricingContext::new(0.0, 1.25).unwrap()
}

#[test]
fn analytics() {
    let a = AffineAnalytics::new(params(), context());
    assert_abs_diff_eq!(a.discount_factor(T1).unwrap(), 0.973_671, epsilon = 1e-6);
    assert_abs_diff_eq!(a.discount_factor(T2).unwrap(), 0.945_536, epsilon = 1e-6);
    assert_abs_diff_eq!(a.forward_ratio(T1, T2).unwrap(), 1.029_755, epsilon = 1e-6);
    assert_abs_diff_eq!(a.volatility(T1, T2, DT).unwrap(), 0.439_081, epsilon = 1e-6);
    assert!(a.warnings().is_empty());
}

#[test]
fn option_prices() {
    let p = ForwardOptionPricer::new(params(), context());
    let call = p.call_price(T1, T2, DT).unwrap();
    let put = p.put_price(T1, T2, DT).unwrap();
    assert_abs_diff_eq!(call, 0.1008, epsilon = 1e-4);
    assert_abs_diff_eq!(put, 0.3090, epsilon = 1e-4);
    assert_abs_diff_eq!(p.parity_gap(T1, T2, DT).unwrap(), 0.0, epsilon = 1e-12);
}

#[test]
fn caplet_and_floorlet() {
    let p = CapletFloorletPricer::new(params(), context());
    assert_abs_diff_eq!(p.caplet(T1, T2, DT).unwrap(), 0.0314, epsilon = 1e-4);
    assert_abs_diff_eq!(p.floorlet(T1, T2, DT).unwrap(), 0.6680, epsilon = 1e-4);
}

#[test]
fn models_agree_with_analytics() {
    let a = AffineAnalytics::new(params(), context());
    let v = Vasicek::new(params());
    let hw = HullWhite::from_parameters(params());
    for big_t in [T1, T2, 5.0] {
        let p = a.discount_factor(big_t).unwrap();
        assert_abs_diff_eq!(v.discount_bond(0.0, big_t, 0.05).unwrap(), p, epsilon = 1e-14);
        assert_abs_diff_eq!(hw.discount_bond(0.0, big_t, 0.05).unwrap(), p, epsilon = 1e-14);
    }
}

#[test]
fn invalid_queries_are_rejected() {
    let p = ForwardOptionPricer::new(params(), context());
    assert!(matches!(p.call_price(T2, T1, DT), Err(Error::TimeOrdering(_))));
    assert!(matches!(p.call_price(T1, T1, DT), Err(Error::TimeOrdering(_))));
    assert!(matches!(p.call_price(T1, T2, 0.0), Err(Error::ParameterDomain(_))));
    assert!(matches!(
        ModelParameters::new(0.0, 0.09, 0.2, 0.05),
        Err(Error::ParameterDomain(_))
    ));
    assert!(matches!(
        PricingContext::new(0.0, -1.0),
        Err(Error::ParameterDomain(_))
    ));
}

#[test]
fn vanishing_mean_reversion_prices_continuously() {
    let near = ModelParameters::new(1e-5, 0.01, 0.03, 0.04).unwrap();
    let degenerate = ModelParameters::new(1e-8, 0.01, 0.03, 0.04).unwrap();
    let ctx = PricingContext::new(0.0, 1.0).unwrap();

    let a = AffineAnalytics::new(degenerate, ctx);
    assert!(a.is_degenerate());
    assert!(matches!(a.warnings()[0], NumericWarning::DegenerateAlpha { .. }));

    let pn = CapletFloorletPricer::new(near, PricingContext::new(0.0, 0.04).unwrap());
    let pd = CapletFloorletPricer::new(degenerate, PricingContext::new(0.0, 0.04).unwrap());
    let (cn, cd) = (pn.caplet(1.0, 1.5, DT).unwrap(), pd.caplet(1.0, 1.5, DT).unwrap());
    assert!(cn.is_finite() && cd.is_finite());
    assert_abs_diff_eq!(cn, cd, epsilon = 1e-5);
}
