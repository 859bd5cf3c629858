//! Cross-calculator properties exercised through the public registry.

use approx::{assert_abs_diff_eq, assert_relative_eq};

use bas_core::calculators::{self, signal::scale_linear};
use bas_core::input::RawInputs;
use bas_core::CalculatorResult;

fn run(id: &str, pairs: &[(&str, &str)]) -> CalculatorResult {
    let inputs = pairs
        .iter()
        .fold(RawInputs::new(), |inputs, (name, value)| inputs.with(*name, *value));
    calculators::evaluate(id, &inputs).unwrap()
}

fn number(result: &CalculatorResult, key: &str) -> f64 {
    result.value(key).parse().unwrap()
}

// ============================================================================
// Analog scaling
// ============================================================================

#[test]
fn analog_scaling_hits_span_endpoints() {
    let spans = [(0.0, 4095.0, 0.0, 100.0), (4.0, 20.0, -40.0, 250.0), (-10.0, 10.0, 5.0, -5.0)];
    for (raw_min, raw_max, eng_min, eng_max) in spans {
        assert_relative_eq!(scale_linear(raw_min, raw_min, raw_max, eng_min, eng_max), eng_min);
        assert_relative_eq!(scale_linear(raw_max, raw_min, raw_max, eng_min, eng_max), eng_max);
    }
}

#[test]
fn analog_scaling_is_monotonic_for_rising_span() {
    let mut last = f64::NEG_INFINITY;
    for raw in (0..=4095).step_by(15) {
        let scaled = scale_linear(f64::from(raw), 0.0, 4095.0, 32.0, 212.0);
        assert!(scaled > last);
        last = scaled;
    }
}

#[test]
fn analog_scaling_blanks_empty_raw_span() {
    let result = run(
        "analog-scaling",
        &[("raw_min", "5"), ("raw_max", "5"), ("eng_min", "0"), ("eng_max", "100"), ("raw", "5")],
    );
    assert!(result.is_blank());
}

// ============================================================================
// Valve Cv
// ============================================================================

#[test]
fn valve_cv_blanks_zero_pressure_drop() {
    assert!(run("valve-cv", &[("flow", "40"), ("dp", "0"), ("sg", "1")]).is_blank());
}

#[test]
fn valve_cv_scales_with_flow() {
    let base = number(&run("valve-cv", &[("flow", "10"), ("dp", "4"), ("sg", "1")]), "cv");
    let triple = number(&run("valve-cv", &[("flow", "30"), ("dp", "4"), ("sg", "1")]), "cv");
    assert_relative_eq!(triple, base * 3.0, epsilon = 0.01);
}

// ============================================================================
// Network
// ============================================================================

#[test]
fn ip_subnet_class_c() {
    let result = run("ip-subnet", &[("address", "192.168.1.0"), ("prefix", "24")]);
    assert_eq!(result.value("hosts"), "254");
    assert_eq!(result.value("range"), "192.168.1.1 - 192.168.1.254");
}

#[test]
fn ip_subnet_host_route_clamps_to_zero() {
    let result = run("ip-subnet", &[("address", "192.168.1.0"), ("prefix", "32")]);
    assert_eq!(result.value("hosts"), "0");
}

#[test]
fn ip_subnet_blanks_signed_or_padded_octets() {
    for address in ["192.+168.1.0", "192. 168.1.0"] {
        assert!(run("ip-subnet", &[("address", address), ("prefix", "24")]).is_blank(), "{}", address);
    }
}

#[test]
fn mstp_trunk_blanks_fractional_device_count() {
    assert!(run("mstp-trunk", &[("devices", "2.5"), ("baud", "38400")]).is_blank());
}

#[test]
fn bacnet_instance_packs_components() {
    let result = run("bacnet-instance", &[("building", "1"), ("floor", "1"), ("device", "1")]);
    assert_eq!(result.value("instance"), "101001");
}

// ============================================================================
// Psychrometrics
// ============================================================================

#[test]
fn enthalpy_matches_across_calculators() {
    let pairs = [("dry_bulb", "75"), ("rh", "50")];
    let enthalpy = run("enthalpy", &pairs);
    let economizer = run("economizer-enthalpy", &pairs);
    assert_eq!(enthalpy.value("enthalpy"), economizer.value("enthalpy"));
    assert_abs_diff_eq!(number(&enthalpy, "enthalpy"), 28.1, epsilon = 0.2);
}

#[test]
fn enthalpy_is_stable_across_calls() {
    let pairs = [("dry_bulb", "75"), ("rh", "50")];
    let first = run("enthalpy", &pairs);
    for _ in 0..10 {
        assert_eq!(run("enthalpy", &pairs), first);
    }
}

#[test]
fn dew_point_never_exceeds_dry_bulb() {
    for rh in ["10", "35", "60", "85", "100"] {
        let result = run("dew-point", &[("dry_bulb", "80"), ("rh", rh)]);
        assert!(number(&result, "fahrenheit") <= 80.05, "rh {}", rh);
    }
}

// ============================================================================
// Unit conversion
// ============================================================================

#[test]
fn pressure_round_trip_through_pascals() {
    let pa = number(&run("pressure-convert", &[("value", "1"), ("from", "in_wc")]), "pa");
    let pa_text = pa.to_string();
    let back = number(&run("pressure-convert", &[("value", pa_text.as_str()), ("from", "pa")]), "in_wc");
    assert_relative_eq!(back, 1.0, epsilon = 1e-3);
}

#[test]
fn every_unit_reads_back_its_own_value() {
    for (id, units) in [
        ("pressure-convert", &["in_wc", "pa", "kpa", "psi", "in_hg", "mbar"][..]),
        ("flow-convert", &["cfm", "gpm", "lps", "m3h"][..]),
        ("temperature-convert", &["f", "c", "k", "r"][..]),
    ] {
        for unit in units {
            let result = run(id, &[("value", "12.5"), ("from", *unit)]);
            assert_relative_eq!(number(&result, unit), 12.5, epsilon = 1e-9);
        }
    }
}

// ============================================================================
// Controls
// ============================================================================

#[test]
fn ziegler_nichols_reference_gains() {
    let result = run("pid-tuning", &[("ku", "2"), ("tu", "60")]);
    assert_eq!(result.value("kp"), "1.200");
    assert_eq!(result.value("ki"), "0.0400");
    assert_eq!(result.value("kd"), "9.00");
}

// ============================================================================
// Blank-on-invalid contract
// ============================================================================

#[test]
fn garbage_in_any_field_never_leaks_nan() {
    for calc in calculators::all() {
        for field in calc.inputs {
            for garbage in ["", "abc", "NaN", "inf", "1e999", "12,5"] {
                let inputs = calc.example_inputs().with(field.name, garbage);
                let result = calc.evaluate(&inputs);
                for output in &result.outputs {
                    let lowered = output.value.to_ascii_lowercase();
                    assert!(
                        !lowered.contains("nan") && !lowered.contains("inf"),
                        "{}.{} = {:?} for {}={:?}",
                        calc.id,
                        output.key,
                        output.value,
                        field.name,
                        garbage
                    );
                }
                assert!(result.is_blank(), "{}: {}={:?} left {:?}", calc.id, field.name, garbage, result);
            }
        }
    }
}

#[test]
fn evaluation_does_not_touch_other_calculators() {
    let before = run("mixed-air", &[("oa_temp", "40"), ("ra_temp", "72"), ("oa_pct", "25")]);
    let _ = run("valve-cv", &[("flow", ""), ("dp", "oops"), ("sg", "1")]);
    let after = run("mixed-air", &[("oa_temp", "40"), ("ra_temp", "72"), ("oa_pct", "25")]);
    assert_eq!(before, after);
}

#[test]
fn unknown_calculator_is_an_error_not_a_blank() {
    let err = calculators::evaluate("warp-core", &RawInputs::new()).unwrap_err();
    assert_eq!(err.error_code(), "UNKNOWN_CALCULATOR");
}
