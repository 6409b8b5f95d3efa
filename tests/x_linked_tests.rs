//! Pedigree scenarios for the X-linked models

use inheritance_models::prelude::*;
use rstest::rstest;
use std::error::Error;
use std::sync::Arc;

type TestResult = Result<(), Box<dyn Error>>;

/// Builds a family and a variant from `(id, sex, phenotype, GT)` rows.
fn pedigree(rows: &[(&str, Sex, Phenotype, &str)]) -> Result<(Variant, Family), Box<dyn Error>> {
    let mut family = Family::new("fam");
    let mut variant = Variant::new("X_153296777_G_A");
    for (id, sex, phenotype, gt) in rows {
        family.insert(Individual::new(id, *sex, *phenotype));
        variant.insert(id, gt.parse()?);
    }
    Ok((variant, family))
}

fn trio(father: &str, mother: &str, son: &str) -> Result<(Variant, Family), Box<dyn Error>> {
    pedigree(&[
        ("father", Sex::Male, Phenotype::Healthy, father),
        ("mother", Sex::Female, Phenotype::Healthy, mother),
        ("son", Sex::Male, Phenotype::Affected, son),
    ])
}

#[test]
fn scenario_a_recessive_carrier_mother_affected_son() -> TestResult {
    let (variant, family) = trio("0/0", "0/1", "1/1")?;
    let sink = MemorySink::new();
    assert!(evaluate_x_linked_recessive(&variant, &family, false, &sink)?);
    assert_eq!(
        sink.records(),
        vec![(variant.id().to_owned(), ReasonCode::AffectedGenotypedMaleHet)]
    );
    Ok(())
}

#[test]
fn scenario_b_recessive_affected_son_hom_ref() -> TestResult {
    let (variant, family) = trio("0/0", "0/1", "0/0")?;
    let sink = MemorySink::new();
    assert!(!evaluate_x_linked_recessive(&variant, &family, false, &sink)?);
    assert!(sink.is_empty());
    Ok(())
}

#[test]
fn scenario_c_dominant_het_mother_and_daughter() -> TestResult {
    let (variant, family) = pedigree(&[
        ("mother", Sex::Female, Phenotype::Healthy, "0/1"),
        ("daughter", Sex::Female, Phenotype::Affected, "0/1"),
    ])?;
    let sink = MemorySink::new();
    assert!(evaluate_x_linked_dominant(&variant, &family, false, &sink)?);
    assert_eq!(sink.records()[0].1, ReasonCode::AffectedGenotyped);
    Ok(())
}

#[rstest]
#[case("./.", "0/1", "1/1")]
#[case("0/0", "./.", "1/1")]
#[case("0/0", "0/1", "./.")]
fn scenario_d_strict_mode_rejects_any_no_call(
    #[case] father: &str,
    #[case] mother: &str,
    #[case] son: &str,
) -> TestResult {
    let (variant, family) = trio(father, mother, son)?;
    for model in Model::ALL.iter() {
        assert!(model.evaluate(&variant, &family, false, &NoopSink)?);
        assert!(!model.evaluate(&variant, &family, true, &NoopSink)?);
    }
    Ok(())
}

#[rstest]
#[case::hemizygous_son("0", "0/1", "1", true, true)]
#[case::healthy_father_carrier("1", "0/1", "1", false, false)]
#[case::healthy_father_het_call("0/1", "0/1", "1/1", false, false)]
#[case::healthy_mother_hom_alt("0/0", "1/1", "1/1", false, false)]
#[case::affected_son_het_call("0/0", "0/1", "0/1", true, true)]
#[case::untyped_parents("./.", "./.", "1", true, true)]
fn x_linked_trio(
    #[case] father: &str,
    #[case] mother: &str,
    #[case] son: &str,
    #[case] recessive: bool,
    #[case] dominant: bool,
) -> TestResult {
    let (variant, family) = trio(father, mother, son)?;
    assert_eq!(
        evaluate_x_linked_recessive(&variant, &family, false, &NoopSink)?,
        recessive
    );
    assert_eq!(
        evaluate_x_linked_dominant(&variant, &family, false, &NoopSink)?,
        dominant
    );
    Ok(())
}

#[rstest]
#[case::all_typed("1/1", Some(ReasonCode::AffectedGenotypedFemaleHomAlt))]
#[case::untyped_daughter_typed_father("./.", Some(ReasonCode::AffectedGenotypedMaleHet))]
#[case::het_daughter("0/1", None)]
fn recessive_affected_daughter(
    #[case] daughter: &str,
    #[case] expected: Option<ReasonCode>,
) -> TestResult {
    let (variant, family) = pedigree(&[
        ("father", Sex::Male, Phenotype::Affected, "1"),
        ("mother", Sex::Female, Phenotype::Healthy, "0/1"),
        ("daughter", Sex::Female, Phenotype::Affected, daughter),
    ])?;
    let evaluation = Model::XLinkedRecessive.evaluate_detailed(&variant, &family, false)?;
    assert_eq!(evaluation.reason(), expected);
    if expected.is_none() {
        assert_eq!(
            evaluation.violation(),
            Some(&Violation {
                individual: "daughter".into(),
                kind: ViolationKind::AffectedFemaleNotHomozygousAlternate,
            })
        );
    }
    Ok(())
}

#[test]
fn unaffected_family_passes_vacuously() -> TestResult {
    let (variant, family) = pedigree(&[
        ("father", Sex::Male, Phenotype::Healthy, "0"),
        ("mother", Sex::Female, Phenotype::Healthy, "0/1"),
    ])?;
    for model in Model::ALL.iter() {
        assert_eq!(
            model.evaluate_detailed(&variant, &family, false)?,
            Evaluation::Pass(ReasonCode::NoAffectedNoVariant)
        );
    }
    Ok(())
}

#[test]
fn missing_genotype_is_a_contract_error() -> TestResult {
    let (mut variant, mut family) = trio("0/0", "0/1", "1/1")?;
    family.insert(Individual::new("sister", Sex::Female, Phenotype::Unknown));
    let err = evaluate_x_linked_dominant(&variant, &family, false, &NoopSink).unwrap_err();
    assert!(matches!(
        err,
        ModelError::MissingGenotype { ref individual, .. } if individual == "sister"
    ));

    variant.insert("sister", "./.".parse()?);
    assert!(evaluate_x_linked_dominant(&variant, &family, false, &NoopSink)?);
    Ok(())
}

#[test]
fn invalid_genotype_flags_are_rejected() -> TestResult {
    let (mut variant, family) = trio("0/0", "0/1", "1/1")?;
    variant.insert(
        "mother",
        Genotype {
            genotyped: true,
            ..Genotype::default()
        },
    );
    for model in Model::ALL.iter() {
        match model.evaluate(&variant, &family, false, &NoopSink) {
            Err(ModelError::InvalidGenotype {
                individual, reason, ..
            }) => {
                assert_eq!(individual, "mother");
                assert_eq!(reason, InvalidGenotypeReason::NoCallState);
            }
            other => panic!("expected an invalid genotype error, got {:?}", other),
        }
    }
    Ok(())
}

struct FailingSink;

impl EvidenceSink for FailingSink {
    fn record(&self, _variant_id: &str, _reason: ReasonCode) -> Result<(), EvidenceSinkError> {
        Err(EvidenceSinkError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "destination unavailable",
        )))
    }
}

#[test]
fn sink_failure_keeps_the_verdict() -> TestResult {
    let (variant, family) = trio("0/0", "0/1", "1/1")?;
    let err = evaluate_x_linked_recessive(&variant, &family, false, &FailingSink).unwrap_err();
    assert!(matches!(err, ModelError::EvidenceSink { passed: true, .. }));
    assert_eq!(err.verdict(), Some(true));

    // Failures never reach the sink.
    let (variant, family) = trio("0/0", "0/1", "0/0")?;
    assert!(!evaluate_x_linked_recessive(&variant, &family, false, &FailingSink)?);
    Ok(())
}

#[test]
fn concurrent_checks_write_whole_records() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("evidence.csv");
    let sink = Arc::new(CsvSinkBuilder::new().describe(true).append_path(&path)?);
    let checker = CheckerBuilder::new().sink(sink).build();
    let (template, family) = trio("0/0", "0/1", "1")?;

    let workers: Vec<_> = (0..4)
        .map(|worker| {
            let checker = checker.clone();
            let family = family.clone();
            let genotypes = template.genotypes().clone();
            std::thread::spawn(move || -> Result<usize, ModelError> {
                let mut passed = 0;
                for i in 0..50 {
                    let variant =
                        Variant::with_genotypes(&format!("X_{}_{}", worker, i), genotypes.clone());
                    passed += checker.passing_models(&variant, &family)?.len();
                }
                Ok(passed)
            })
        })
        .collect();

    let mut passed = 0;
    for worker in workers {
        passed += worker.join().map_err(|_| "worker panicked")??;
    }
    assert_eq!(passed, 4 * 50 * 2);

    let mut reader = csv::ReaderBuilder::new().from_path(&path)?;
    let headers = reader.headers()?.clone();
    assert_eq!(headers.len(), 3);
    let mut rows = 0;
    for record in reader.records() {
        let record = record?;
        assert_eq!(record.len(), 3);
        assert!(record[0].starts_with("X_"));
        let reason = &record[1];
        assert!(reason == "AFFECTED_GENOTYPED_MALE_HET" || reason == "AFFECTED_GENOTYPED");
        rows += 1;
    }
    assert_eq!(rows, passed);
    Ok(())
}
