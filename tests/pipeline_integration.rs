//! End-to-end pipeline tests: intake → vectorize → index → match, driven
//! through the public crate APIs the way the server drives them.

use std::sync::Arc;

use provec::{
    vectorize_submission, FieldSpec, FieldSpecList, FieldValue, IntakeConfig, MatchConfig,
    MatchEngine, ProfileRecord, ProfileSubmission, WordVectorTable,
};

fn lookup() -> Arc<WordVectorTable> {
    Arc::new(
        WordVectorTable::from_pairs(
            2,
            vec![
                ("python", vec![1.0, 0.0]),
                ("go", vec![0.8, 0.2]),
                ("design", vec![0.0, 1.0]),
                ("figma", vec![0.1, 0.9]),
            ],
        )
        .unwrap(),
    )
}

fn specs() -> FieldSpecList {
    FieldSpecList::new(vec![
        FieldSpec::new("skills", 1.0),
        FieldSpec::new("one_line_bio", 0.7),
        FieldSpec::new("location", 0.4),
    ])
    .unwrap()
}

fn engine() -> MatchEngine {
    MatchEngine::in_memory(lookup(), specs(), IntakeConfig::default()).unwrap()
}

fn submission(skills: &[&str], bio: &str) -> ProfileSubmission {
    let mut profile = ProfileRecord::new();
    profile.insert(
        "skills",
        FieldValue::List(skills.iter().map(|s| s.to_string()).collect()),
    );
    profile.insert("one_line_bio", bio);
    ProfileSubmission::new(profile)
}

#[test]
fn registered_population_ranks_by_similarity() {
    let engine = engine();
    let cfg = MatchConfig::default();

    let backend = engine
        .register_profile(submission(&["Python", "Go"], "backend engineer"), &cfg)
        .unwrap();
    let designer = engine
        .register_profile(submission(&["Design", "Figma"], "product design"), &cfg)
        .unwrap();

    // A new Python profile should be closer to the backend engineer.
    let hits = engine
        .match_profile(submission(&["Python"], "loves python"), &cfg)
        .unwrap();

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].profile_id, backend.profile_id);
    assert_eq!(hits[1].profile_id, designer.profile_id);
    assert!(hits[0].score > hits[1].score);
    assert_eq!(hits[0].rank, 1);
}

#[test]
fn registration_metadata_round_trips_through_the_index() {
    let engine = engine();

    let mut profile = ProfileRecord::new();
    profile.insert("skills", FieldValue::List(vec!["Python".into()]));
    profile.insert("experience", 5.0);
    profile.insert("open_to_remote", true);
    profile.insert("unused_note", FieldValue::Null);

    let registration = engine
        .register_profile(
            ProfileSubmission {
                id: "meta-sub".into(),
                profile,
                saved_at: None,
                schema_version: Some("v2".into()),
            },
            &MatchConfig::default(),
        )
        .unwrap();

    let stored = engine
        .index()
        .get(&registration.profile_id)
        .unwrap()
        .unwrap();
    assert_eq!(stored.metadata["skills"][0], "Python");
    assert_eq!(stored.metadata["experience"], 5.0);
    assert_eq!(stored.metadata["open_to_remote"], true);
    assert_eq!(stored.metadata["schema_version"], "v2");
    assert!(stored.metadata.get("unused_note").is_none());
    assert!(stored.metadata.get("saved_at").is_some());
}

#[test]
fn worked_example_matches_published_numbers() {
    // field_specs = [skills w=1.0, location w=0.4], lookup knows only
    // "python" = [1, 0]; profile = {skills: ["Python"], location:
    // "Remote"}. Expected vector: [1, 0] / 1.4.
    let lookup =
        WordVectorTable::from_pairs(2, vec![("python", vec![1.0, 0.0])]).unwrap();
    let specs = FieldSpecList::new(vec![
        FieldSpec::new("skills", 1.0),
        FieldSpec::new("location", 0.4),
    ])
    .unwrap();

    let mut profile = ProfileRecord::new();
    profile.insert("skills", FieldValue::List(vec!["Python".into()]));
    profile.insert("location", "Remote");

    let result = vectorize_submission(
        ProfileSubmission::new(profile),
        &IntakeConfig::default(),
        &specs,
        &lookup,
    )
    .unwrap();

    assert!((result.vector[0] - 0.714).abs() < 1e-3);
    assert!(result.vector[1].abs() < 1e-6);
}

#[test]
fn list_and_string_skills_match_identically() {
    let engine = engine();
    let cfg = MatchConfig::default();
    engine
        .register_profile(submission(&["Python", "Go"], "backend"), &cfg)
        .unwrap();

    let mut as_list = ProfileRecord::new();
    as_list.insert(
        "skills",
        FieldValue::List(vec!["Python".into(), "Go".into()]),
    );
    let mut as_text = ProfileRecord::new();
    as_text.insert("skills", "Python Go");

    let list_hits = engine
        .match_profile(ProfileSubmission::new(as_list), &cfg)
        .unwrap();
    let text_hits = engine
        .match_profile(ProfileSubmission::new(as_text), &cfg)
        .unwrap();

    assert_eq!(list_hits.len(), text_hits.len());
    assert!((list_hits[0].score - text_hits[0].score).abs() < 1e-6);
}

#[test]
fn growing_population_keeps_max_results_bounded() {
    let engine = engine();
    let cfg = MatchConfig {
        max_results: 3,
        min_score: None,
    };

    for i in 0..8 {
        engine
            .register_profile(
                submission(&["Python"], &format!("engineer number {i}")),
                &cfg,
            )
            .unwrap();
    }

    let hits = engine
        .match_profile(submission(&["Python"], "one more"), &cfg)
        .unwrap();
    assert_eq!(hits.len(), 3);
    assert_eq!(engine.index().len().unwrap(), 8);
}
