// tests/config_properties.rs

mod common;
use crate::common::{runner_with_git, EnvBuilder, FakeRunner, FAKE_SHA};

use proptest::prelude::*;

use fluxci::config::{missing_required, resolve_image_tag, RawPipelineConfig, REQUIRED_VARS};
use fluxci::errors::PipelineError;

fn block_on<F: std::future::Future>(f: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("building test runtime")
        .block_on(f)
}

fn tag_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        "[a-z0-9][a-z0-9.-]{0,15}".prop_map(Some),
    ]
}

proptest! {
    /// Whatever subset of required variables is removed, exactly that subset
    /// is reported, in declaration order.
    #[test]
    fn missing_vars_are_reported_exactly(mask in proptest::collection::vec(any::<bool>(), REQUIRED_VARS.len())) {
        let mut builder = EnvBuilder::complete();
        let mut expected = Vec::new();
        for (name, removed) in REQUIRED_VARS.iter().zip(&mask) {
            if *removed {
                builder = builder.without(name);
                expected.push(name.to_string());
            }
        }
        let env = builder.build();

        let raw = RawPipelineConfig::from_env(&env);
        prop_assert_eq!(missing_required(&raw), expected);
    }

    /// Override > IMAGE_TAG > revision hash, with empty values skipped.
    #[test]
    fn tag_precedence_holds(over in tag_strategy(), env_tag in tag_strategy()) {
        let runner = runner_with_git();

        let tag = block_on(resolve_image_tag(over.as_deref(), env_tag.as_deref(), &runner)).unwrap();

        let expected = over
            .clone()
            .filter(|t| !t.is_empty())
            .or_else(|| env_tag.clone().filter(|t| !t.is_empty()))
            .unwrap_or_else(|| FAKE_SHA.to_string());
        prop_assert_eq!(&tag, &expected);

        let no_tag_given = over.as_deref().is_none_or(str::is_empty)
            && env_tag.as_deref().is_none_or(str::is_empty);
        prop_assert_eq!(!runner.captured().is_empty(), no_tag_given);
    }

    /// Without a usable tag anywhere, a failing lookup always surfaces as
    /// RevisionLookup.
    #[test]
    fn failed_lookup_without_tag_is_revision_error(empty_over in any::<bool>(), empty_env in any::<bool>()) {
        let runner = FakeRunner::new();
        let over = empty_over.then(String::new);
        let env_tag = empty_env.then(String::new);

        let err = block_on(resolve_image_tag(over.as_deref(), env_tag.as_deref(), &runner)).unwrap_err();

        prop_assert!(matches!(err, PipelineError::RevisionLookup { .. }), "got {:?}", err);
    }
}
