#[cfg(test)]
mod tests {
    use icow_engine::batch::evaluate_batch;
    use icow_engine::dike::{dike_cost, DikeGeometry};
    use icow_engine::{
        characterize_city, evaluate, CityCase, CityCharacteristics, CityParams, IcowError, Levers, ParamsError,
    };
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    const TCVI: f64 = 1.5e12;
    const CEC: f64 = 17.0;

    fn close(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() <= 1e-12 * expected.abs().max(1.0)
    }

    fn assert_close(actual: f64, expected: f64, what: &str) {
        assert!(close(actual, expected), "{}: {} != {}", what, actual, expected);
    }

    /// One lever set per case, (W, B, R, P, D).
    fn one_per_case() -> Vec<(u8, Levers)> {
        vec![
            (1, Levers::new(1.0, 4.0, 2.0, 0.6, 5.0)),
            (2, Levers::new(2.0, 1.0, 3.0, 0.8, 5.0)),
            (3, Levers::new(0.0, 2.0, 0.0, 0.0, 5.0)),
            (4, Levers::new(0.0, 0.0, 0.0, 0.0, 5.0)),
            (5, Levers::new(0.0, 4.0, 2.0, 0.6, 0.0)),
            (6, Levers::new(0.0, 2.0, 3.0, 0.6, 0.0)),
            (7, Levers::new(0.0, 3.0, 0.0, 0.0, 0.0)),
            (8, Levers::new(0.0, 100.0, 4.0, 0.5, 100.0)),
            (9, Levers::new(3.0, 100.0, 100.0, 0.5, 100.0)),
        ]
    }

    fn check_invariants(rec: &CityCharacteristics, params: &CityParams) {
        let tops = rec.zone_tops();
        assert!(tops[0] <= tops[1] && tops[1] <= tops[2] && tops[2] <= tops[3],
            "{}: zone tops must be non-decreasing: {:?}", rec.case, tops);
        assert_eq!(tops[3], params.city_elevation_change);
        assert!(tops[0] >= rec.withdrawal_height);

        let [vz1, vz2, vz3, vz4] = rec.zone_values();
        assert_eq!(rec.final_value, vz1 + vz2 + vz3 + vz4, "{}: value must be conserved", rec.case);

        let eps = 1e-12;
        let bound = if rec.case.has_dike() { params.protected_value_ratio.max(1.0) } else { 1.0 };
        assert!(rec.final_value <= rec.value_after_withdrawal * bound * (1.0 + eps),
            "{}: final value {} above bound", rec.case, rec.final_value);

        assert_eq!(rec.total_investment_cost,
            rec.withdrawal_cost + rec.dike_cost + rec.resiliency_cost);
        let expected_tc = match rec.case {
            CityCase::Unprotected => rec.initial_value - rec.final_value,
            _ => rec.total_investment_cost + rec.final_value - rec.initial_value,
        };
        assert_eq!(rec.total_cost, expected_tc);

        if !rec.case.has_resiliency() {
            assert_eq!(rec.resiliency_cost, 0.0, "{}: no resiliency cost", rec.case);
        }
        for v in [rec.dike_cost, rec.withdrawal_cost, rec.resiliency_cost, rec.total_cost] {
            assert!(v.is_finite());
        }
    }

    // ========== Case Partition ==========

    #[test]
    fn each_case_is_reachable() {
        let params = CityParams::default();
        for (expected, levers) in one_per_case() {
            let rec = characterize_city(&levers, &params).expect("test: lever set is valid");
            assert_eq!(rec.case_number(), expected, "{:?}", levers);
            check_invariants(&rec, &params);
        }
    }

    #[test]
    fn case_forces_absent_fields_to_zero() {
        let params = CityParams::default();
        // (case, zones forced to zero, dike cost zero, resiliency cost zero)
        let forced: [(u8, &[usize], bool, bool); 9] = [
            (1, &[], false, false),
            (2, &[1], false, false),
            (3, &[0], false, true),
            (4, &[0, 1], false, true),
            (5, &[2], false, false),
            (6, &[1, 2], true, false),
            (7, &[0, 2], false, true),
            (8, &[1, 2], true, false),
            (9, &[0, 1, 2], true, true),
        ];
        for ((case, levers), (n, zeros, no_dike, no_res)) in one_per_case().into_iter().zip(forced) {
            assert_eq!(case, n);
            let rec = characterize_city(&levers, &params).expect("test: lever set is valid");
            let values = rec.zone_values();
            for &z in zeros {
                assert_eq!(values[z], 0.0, "case {} zone {}", n, z + 1);
            }
            assert_eq!(rec.dike_cost == 0.0, no_dike, "case {} dike cost", n);
            assert_eq!(rec.resiliency_cost == 0.0, no_res, "case {} resiliency cost", n);
        }
    }

    // ========== Reference Scenarios ==========

    #[test]
    fn degenerate_levers_cost_nothing() {
        for p in [0.0, 0.5, 0.99, 3.0] {
            let rec = evaluate(100.0, 100.0, 100.0, p, 100.0).expect("test: inactive levers are valid");
            assert_eq!(rec.case, CityCase::Unprotected);
            assert_eq!(rec.withdrawal_cost, 0.0);
            assert_eq!(rec.dike_cost, 0.0);
            assert_eq!(rec.resiliency_cost, 0.0);
            assert_eq!(rec.value_after_withdrawal, TCVI);
            assert_eq!(rec.final_value, TCVI);
            assert_eq!(rec.total_cost, 0.0);
        }
    }

    #[test]
    fn zero_case() {
        let rec = evaluate(0.0, 0.0, 0.0, 0.0, 0.0).expect("test: zero levers are valid");
        assert_eq!(rec.case_number(), 9);
        assert_eq!(rec.total_investment_cost, 0.0);
        assert_eq!(rec.zone_values(), [0.0, 0.0, 0.0, TCVI]);
        assert_eq!(rec.zone_tops(), [0.0, 0.0, 0.0, CEC]);
    }

    #[test]
    fn withdrawal_only() {
        let rec = evaluate(5.0, 0.0, 0.0, 0.0, 0.0).expect("test: withdrawal-only levers are valid");
        assert_eq!(rec.case_number(), 9);
        assert_eq!(rec.withdrawal_height, 5.0);
        assert_close(rec.fraction_withdrawn, 5.0 / 17.0, "fw");
        assert_close(rec.value_after_withdrawal, TCVI * (1.0 - 0.01 * 5.0 / 17.0), "tcvaw");
        assert_eq!(rec.withdrawal_cost, 6.25e11);
        assert_close(rec.infrastructure_lost_to_withdrawal, TCVI * 5.0 / 17.0 * 0.01, "ilfw");
        assert_eq!(rec.dike_cost, 0.0);
        assert_eq!(rec.resiliency_cost, 0.0);
        assert_eq!(rec.total_investment_cost, rec.withdrawal_cost);
        assert_eq!(rec.zone_tops(), [5.0, 5.0, 5.0, CEC]);
        // case 9 net cost is the value lost, investment excluded
        assert_close(rec.total_cost, TCVI - rec.value_after_withdrawal, "tc");
    }

    #[test]
    fn dike_only() {
        let rec = evaluate(0.0, 0.0, 0.0, 0.0, 5.0).expect("test: dike-only levers are valid");
        assert_eq!(rec.case_number(), 4);
        let expected_dike = (43_000.0 * 7.0 * 31.0 + 147.0 / 462.25) * 10.0;
        assert_close(rec.dike_cost, expected_dike, "dc");
        assert_close(rec.zone3_value, TCVI * 1.1 * 5.0 / 17.0, "vz3");
        assert_close(rec.zone4_value, TCVI * 12.0 / 17.0, "vz4");
        assert_eq!(rec.zone_tops(), [0.0, 0.0, 5.0, CEC]);
        assert_close(rec.total_cost, expected_dike + rec.final_value - TCVI, "tc");
    }

    // ========== Case Table ==========

    /// fcR(0.6) = 1.25 * (0.115 * 0.2 / 0.4 + 0.6 * 0.35)
    const FCR_06: f64 = 0.334375;

    /// Zero-height dike: ch = 2, prism = 43000 * 2 * (3 + 8), wedge = 3 * 4 / 21.5^2
    fn start_up_dike_cost() -> f64 {
        (43_000.0 * 2.0 * 11.0 + 12.0 / 462.25) * 10.0
    }

    fn five_meter_dike_cost() -> f64 {
        (43_000.0 * 7.0 * 31.0 + 147.0 / 462.25) * 10.0
    }

    fn assert_zones(rec: &CityCharacteristics, values: [f64; 4], tops: [f64; 4]) {
        for (i, (actual, expected)) in rec.zone_values().into_iter().zip(values).enumerate() {
            assert_close(actual, expected, &format!("{} vz{}", rec.case, i + 1));
        }
        assert_eq!(rec.zone_tops(), tops, "{} zone tops", rec.case);
    }

    #[test]
    fn case_one_values() {
        let rec = evaluate(1.0, 4.0, 2.0, 0.6, 5.0).expect("test: case 1 levers are valid");
        assert_eq!(rec.case, CityCase::DikeSetbackPartialResiliency);
        let tcvaw = TCVI * (1.0 - 0.01 / 17.0);
        assert_zones(
            &rec,
            [tcvaw * 0.95 * 2.0 / 16.0, tcvaw * 0.95 * 2.0 / 16.0, tcvaw * 1.1 * 5.0 / 16.0, tcvaw * 7.0 / 16.0],
            [3.0, 5.0, 10.0, CEC],
        );
        assert_close(rec.dike_cost, five_meter_dike_cost(), "dc");
        // rh * (rh / 2 + basement) = 2 * 4
        assert_close(rec.resiliency_cost, tcvaw * FCR_06 * 8.0 / (30.0 * 16.0), "rc");
        assert_close(rec.withdrawal_cost, TCVI / 16.0, "wc");
    }

    #[test]
    fn case_three_values() {
        let rec = evaluate(0.0, 2.0, 0.0, 0.0, 5.0).expect("test: case 3 levers are valid");
        assert_eq!(rec.case, CityCase::DikeSetback);
        assert_zones(
            &rec,
            [0.0, TCVI * 0.95 * 2.0 / 17.0, TCVI * 1.1 * 5.0 / 17.0, TCVI * 10.0 / 17.0],
            [0.0, 2.0, 7.0, CEC],
        );
        assert_close(rec.dike_cost, five_meter_dike_cost(), "dc");
        assert_eq!(rec.resiliency_cost, 0.0);
    }

    #[test]
    fn case_five_values() {
        let rec = evaluate(0.0, 4.0, 2.0, 0.6, 0.0).expect("test: case 5 levers are valid");
        assert_eq!(rec.case, CityCase::SetbackPartialResiliency);
        assert_zones(
            &rec,
            [TCVI * 0.95 * 2.0 / 17.0, TCVI * 0.95 * 2.0 / 17.0, 0.0, TCVI * 13.0 / 17.0],
            [2.0, 4.0, 4.0, CEC],
        );
        assert_close(rec.dike_cost, start_up_dike_cost(), "dc");
        assert_close(rec.resiliency_cost, TCVI * FCR_06 * 8.0 / (30.0 * 17.0), "rc");
    }

    #[test]
    fn case_six_values() {
        let rec = evaluate(0.0, 2.0, 3.0, 0.6, 0.0).expect("test: case 6 levers are valid");
        assert_eq!(rec.case, CityCase::SetbackFullResiliency);
        assert_zones(&rec, [TCVI * 0.95 * 2.0 / 17.0, 0.0, 0.0, TCVI * 15.0 / 17.0], [2.0, 2.0, 2.0, CEC]);
        assert_eq!(rec.dike_cost, 0.0);
        // dbh * (rh - dbh / 2 + basement) = 2 * 5
        assert_close(rec.resiliency_cost, TCVI * FCR_06 * 10.0 / (30.0 * 17.0), "rc");
    }

    #[test]
    fn case_seven_values() {
        let rec = evaluate(0.0, 3.0, 0.0, 0.0, 0.0).expect("test: case 7 levers are valid");
        assert_eq!(rec.case, CityCase::SetbackOnly);
        assert_zones(&rec, [0.0, TCVI * 0.95 * 3.0 / 17.0, 0.0, TCVI * 14.0 / 17.0], [0.0, 3.0, 3.0, CEC]);
        assert_close(rec.dike_cost, start_up_dike_cost(), "dc");
        assert_eq!(rec.resiliency_cost, 0.0);
        assert_close(rec.total_cost, rec.dike_cost + rec.final_value - TCVI, "tc");
    }

    #[test]
    fn resiliency_past_city_top_is_charged_in_full() {
        // case 6 prices the setback band off the full resiliency height
        let rec = evaluate(0.0, 2.0, 40.0, 0.5, 0.0).expect("test: tall resiliency is accepted");
        assert_eq!(rec.case, CityCase::SetbackFullResiliency);
        assert_eq!(rec.zone_tops(), [2.0, 2.0, 2.0, CEC]);
        // fcR(0.5) = 0.2475; dbh * (rh - dbh / 2 + basement) = 2 * 42
        assert_close(rec.resiliency_cost, TCVI * 0.2475 * 84.0 / (30.0 * 17.0), "rc");
    }

    #[test]
    fn full_protection_resolves_to_case_two() {
        let rec = evaluate(2.0, 1.0, 3.0, 0.8, 5.0).expect("test: full protection levers are valid");
        assert_eq!(rec.case, CityCase::DikeSetbackFullResiliency);
        assert_eq!(rec.zone2_value, 0.0);

        let tcvaw = TCVI * (1.0 - 0.01 * 2.0 / 17.0);
        assert_close(rec.value_after_withdrawal, tcvaw, "tcvaw");
        assert_close(rec.zone1_value, tcvaw * 0.95 * 1.0 / 15.0, "vz1");
        assert_close(rec.zone3_value, tcvaw * 1.1 * 5.0 / 15.0, "vz3");
        assert_close(rec.zone4_value, tcvaw * 9.0 / 15.0, "vz4");
        assert_eq!(rec.zone_tops(), [3.0, 3.0, 8.0, CEC]);

        // fcR(0.8) = 0.6375; setback height bears the cost
        assert_close(rec.resiliency_cost, tcvaw * 0.6375 * 1.0 * 5.5 / (30.0 * 15.0), "rc");
        assert_close(rec.withdrawal_cost, TCVI * 2.0 / 15.0, "wc");
        assert!(rec.final_value > rec.value_after_withdrawal, "protected band is valued up");
    }

    #[test]
    fn zone_one_counts_toward_final_value_in_case_two() {
        let rec = evaluate(0.0, 5.0, 6.0, 0.5, 3.0).expect("test: edge levers are valid");
        assert_eq!(rec.case_number(), 2);
        assert!(rec.zone1_value > 0.0);
        assert_eq!(rec.final_value, rec.zone1_value + rec.zone2_value + rec.zone3_value + rec.zone4_value);
    }

    #[test]
    fn resistance_without_setback_falls_back_to_unprotected() {
        let rec = evaluate(0.0, 0.0, 4.0, 0.5, 0.0).expect("test: levers are valid");
        assert_eq!(rec.case_number(), 9);
        assert_eq!(rec.resiliency_height, 0.0);
    }

    #[test]
    fn resiliency_only_needs_inactive_setback() {
        let rec = evaluate(0.0, 100.0, 4.0, 0.5, 100.0).expect("test: levers are valid");
        assert_eq!(rec.case, CityCase::ResiliencyOnly);
        assert_close(rec.zone1_value, TCVI * 4.0 / 17.0, "vz1");
        assert_close(rec.zone4_value, TCVI * 13.0 / 17.0, "vz4");
        assert_close(rec.final_value, TCVI, "fcv");
        // fcR(0.5) = 1.25 * (0.115 * 0.1 / 0.5 + 0.175) = 0.2475
        assert_close(rec.resiliency_cost, TCVI * 0.2475 * 4.0 * 5.0 / (30.0 * 17.0), "rc");
    }

    #[test]
    fn setback_cases_charge_dike_start_up() {
        let start_up = dike_cost(0.0, &DikeGeometry::from_params(&CityParams::default()));
        let rec = evaluate(0.0, 3.0, 0.0, 0.0, 0.0).expect("test: setback levers are valid");
        assert_eq!(rec.case_number(), 7);
        assert_eq!(rec.dike_cost, start_up);
        assert_eq!(rec.dike_height, 0.0);
    }

    #[test]
    fn damage_to_resilient_follows_resistance() {
        let rec = evaluate(0.0, 4.0, 2.0, 0.6, 0.0).expect("test: levers are valid");
        assert_close(rec.damage_to_resilient, 0.4, "dtr");
        let rec = evaluate(0.0, 4.0, 0.0, 0.6, 0.0).expect("test: levers are valid");
        assert_close(rec.damage_to_resilient, 0.5, "neutral dtr");
    }

    // ========== Domain Errors ==========

    #[test]
    fn withdrawal_at_city_top_is_rejected() {
        assert!(matches!(evaluate(17.0, 0.0, 0.0, 0.0, 0.0), Err(IcowError::WithdrawalAtCityTop { .. })));
        assert!(matches!(evaluate(20.0, 0.0, 0.0, 0.0, 0.0), Err(IcowError::WithdrawalAtCityTop { .. })));
    }

    #[test]
    fn negative_heights_are_rejected() {
        assert!(matches!(evaluate(0.0, 0.0, 0.0, 0.0, -2.0), Err(IcowError::NegativeHeight { lever: "dike", .. })));
        assert!(matches!(evaluate(0.0, 0.0, -0.5, 0.0, 0.0), Err(IcowError::NegativeHeight { lever: "resiliency", .. })));
    }

    #[test]
    fn full_resistance_is_a_domain_boundary() {
        assert!(matches!(evaluate(0.0, 4.0, 2.0, 1.0, 0.0), Err(IcowError::ResistanceOutOfRange { .. })));
    }

    // ========== Parameter Injection ==========

    #[test]
    fn injected_parameters_change_the_profile() {
        let params = CityParams::from_json(r#"{"city_elevation_change": 20.0, "total_city_value": 1.0e9}"#)
            .expect("test: parameter override should load");
        let rec = characterize_city(&Levers::new(5.0, 0.0, 0.0, 0.0, 0.0), &params)
            .expect("test: levers are valid");
        assert_eq!(rec.zone4_top, 20.0);
        assert_close(rec.withdrawal_cost, 1.0e9 * 5.0 / 15.0, "wc");
        // withdrawal at the old CEC is now allowed
        assert!(characterize_city(&Levers::new(17.0, 0.0, 0.0, 0.0, 0.0), &params).is_ok());
    }

    #[test]
    fn struct_built_parameters_are_validated() {
        let params = CityParams { dike_side_slope: 0.0, ..CityParams::default() };
        let err = characterize_city(&Levers::new(0.0, 0.0, 0.0, 0.0, 5.0), &params).unwrap_err();
        assert!(
            matches!(err, IcowError::InvalidParams(ParamsError::NonPositive { name: "dike_side_slope", .. })),
            "unexpected error: {}",
            err
        );

        let params = CityParams { total_city_value: f64::NAN, ..CityParams::default() };
        let err = characterize_city(&Levers::inactive(&params), &params).unwrap_err();
        assert!(matches!(err, IcowError::InvalidParams(ParamsError::NonFinite { .. })));
    }

    // ========== Randomized Sweep ==========

    #[test]
    fn random_levers_keep_record_invariants() {
        let params = CityParams::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut seen = [false; 9];
        let mut evaluated = 0;

        for _ in 0..5000 {
            let height = |rng: &mut ChaCha8Rng| {
                if rng.gen_bool(0.15) { 100.0 } else { rng.gen_range(0.0..8.0) }
            };
            let levers = Levers::new(
                height(&mut rng),
                height(&mut rng),
                height(&mut rng),
                rng.gen_range(0.0..0.99),
                height(&mut rng),
            );
            match characterize_city(&levers, &params) {
                Ok(rec) => {
                    check_invariants(&rec, &params);
                    seen[rec.case_number() as usize - 1] = true;
                    evaluated += 1;
                }
                Err(IcowError::ProfileExceedsCity { top, .. }) => assert!(top > CEC),
                Err(e) => panic!("unexpected rejection of {:?}: {}", levers, e),
            }
        }

        assert!(evaluated > 1000, "too few valid samples: {}", evaluated);
        assert!(seen.iter().all(|&s| s), "every case should appear: {:?}", seen);
    }

    #[test]
    fn batch_matches_single_evaluation() {
        let params = CityParams::default();
        let levers: Vec<Levers> = one_per_case().into_iter().map(|(_, l)| l).collect();
        let out = evaluate_batch(&levers, &params);
        for (l, o) in levers.iter().zip(&out) {
            let single = characterize_city(l, &params).expect("test: lever set is valid");
            assert_eq!(o.result.as_ref().expect("test: batch entry is valid"), &single);
        }
    }

    #[test]
    fn record_serializes_case_number() {
        let rec = evaluate(0.0, 0.0, 0.0, 0.0, 5.0).expect("test: levers are valid");
        let json = serde_json::to_value(&rec).expect("test: record serializes");
        assert_eq!(json["case"], 4);
        let back: CityCharacteristics = serde_json::from_value(json).expect("test: record deserializes");
        assert_eq!(back, rec);
    }
}
