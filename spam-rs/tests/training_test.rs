//! End-to-end tests: train from a corpus file, persist, load, classify

use spam_rs::config::ArtifactPaths;
use spam_rs::{Label, Predictor, SpamConfig, SpamError, Trainer};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const DAYS: [&str; 10] = [
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday", "today",
    "tomorrow", "tonight",
];

const HOOKS: [&str; 10] = [
    "reply", "text", "claim", "txt", "collect", "redeem", "dial", "visit", "grab", "send",
];

/// 10 ham rows about meetings, 10 spam rows about winning prizes
fn write_corpus(path: &Path) {
    let mut content = String::new();
    for i in 0..10 {
        content.push_str(&format!("ham\tReminder: team meeting {} in room\n", DAYS[i]));
        content.push_str(&format!(
            "spam\tCongratulations you win a cash prize! {} now\n",
            HOOKS[i]
        ));
    }
    fs::write(path, content).unwrap();
}

fn config_in(dir: &Path) -> SpamConfig {
    let mut config = SpamConfig::default();
    config.dataset.path = dir.join("SMSSpamCollection");
    config.artifacts = ArtifactPaths::in_dir(&dir.join("artifacts"));
    config
}

#[test]
fn test_train_then_classify_spam() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    write_corpus(&config.dataset.path);

    let outcome = Trainer::new(config.clone()).run().unwrap();
    assert_eq!(outcome.train_rows, 16);
    assert_eq!(outcome.test_rows, 4);
    assert!(config.artifacts.vectorizer_path.exists());
    assert!(config.artifacts.model_path.exists());

    let predictor = Predictor::load(&config.artifacts);
    assert!(predictor.health().model_loaded);

    let result = predictor.classify("you win a free prize now").unwrap();
    assert!(result.is_spam);
    assert_eq!(result.label, Label::Spam);
    assert!(result.percent() > 50.0);
    assert_eq!(result.display_label(), "Spam");

    let result = predictor.classify("see you at the meeting").unwrap();
    assert!(!result.is_spam);
}

#[test]
fn test_probabilities_sum_to_one() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    write_corpus(&config.dataset.path);
    Trainer::new(config.clone()).run().unwrap();

    let predictor = Predictor::load(&config.artifacts);
    for message in [
        "Reminder: team meeting monday in room",
        "Congratulations you win a cash prize! reply now",
        "zzqxw nonsense gibberish",
        "",
    ] {
        let result = predictor.classify(message).unwrap();
        let sum: f64 = result.probabilities.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6, "sum {} for {:?}", sum, message);
    }
}

#[test]
fn test_retraining_is_reproducible() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    write_corpus(&config.dataset.path);

    Trainer::new(config.clone()).run().unwrap();
    let vectorizer = fs::read(&config.artifacts.vectorizer_path).unwrap();
    let model = fs::read(&config.artifacts.model_path).unwrap();

    Trainer::new(config.clone()).run().unwrap();
    assert_eq!(fs::read(&config.artifacts.vectorizer_path).unwrap(), vectorizer);
    assert_eq!(fs::read(&config.artifacts.model_path).unwrap(), model);
}

#[test]
fn test_missing_dataset_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());

    let err = Trainer::new(config.clone()).run().unwrap_err();
    assert!(matches!(err, SpamError::DatasetNotFound(_)));
    assert!(!config.artifacts.vectorizer_path.exists());
    assert!(!config.artifacts.model_path.exists());
}

#[test]
fn test_unknown_label_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    write_corpus(&config.dataset.path);
    let mut content = fs::read_to_string(&config.dataset.path).unwrap();
    content.push_str("maybe\tnot sure about this one\n");
    fs::write(&config.dataset.path, content).unwrap();

    let err = Trainer::new(config.clone()).run().unwrap_err();
    assert!(matches!(err, SpamError::UnknownLabel { line: 21, .. }));
    assert!(!config.artifacts.model_path.exists());
}

#[test]
fn test_stop_word_only_corpus_is_empty_vocabulary() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    let mut content = String::new();
    for _ in 0..5 {
        content.push_str("ham\tthe and is\nspam\tyou are a\n");
    }
    fs::write(&config.dataset.path, content).unwrap();

    let err = Trainer::new(config.clone()).run().unwrap_err();
    assert!(matches!(err, SpamError::EmptyVocabulary));
    assert!(!config.artifacts.vectorizer_path.exists());
}
