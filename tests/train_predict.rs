use bayes_core::Model;
use pretty_assertions::assert_eq;
use std::io::Write;

#[test]
fn trains_from_a_csv_file_and_ranks_queries() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    write!(
        file,
        "id,disease,symptoms,treatment\n\
         1,Flu,fever;cough;body ache,Rest and fluids\n\
         2,flu,fever;chills,Rest and fluids\n\
         3,Common Cold,cough;sneezing;runny nose,Fluids\n\
         4,Migraine,headache;nausea,Pain relievers\n"
    )
    .expect("write training rows");

    let model = Model::from_csv_path(file.path()).expect("training should succeed");
    assert_eq!(model.total_cases(), 4);
    assert_eq!(model.num_diseases(), 3);

    let ranked = model.predict(&["fever".to_string(), "cough".to_string()]);
    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[0].disease, "flu");
    assert_eq!(ranked[0].treatment.as_deref(), Some("Rest and fluids"));
    for pair in ranked.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn missing_training_file_is_reported() {
    let dir = tempfile::tempdir().expect("tmpdir");
    let missing = dir.path().join("no_such_dataset.csv");

    let err = Model::from_csv_path(&missing).expect_err("missing file should fail");
    assert!(err.to_string().contains("failed to open training data"));
}

#[test]
fn file_with_only_skipped_rows_is_reported() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    write!(file, "id,disease,symptoms,treatment\n1,flu\n2\n").expect("write rows");

    let err = Model::from_csv_path(file.path()).expect_err("no usable rows should fail");
    assert!(err.to_string().contains("no usable rows"));
}
