use proptest::{
    prelude::*,
    test_runner::{Config, TestRunner},
};
use pulldown_cmark::{CowStr, Event};

use crate::transformer::{WithTransformer, line_break::LineBreakTransformer};

#[test]
fn soft_breaks_become_hard_breaks() {
    let mut runner = TestRunner::new(Config {
        cases: 32,
        failure_persistence: None,
        ..Config::default()
    });

    runner
        .run(&proptest::collection::vec(any::<bool>(), 0..12), |layout| {
            let events: Vec<Event<'_>> = layout
                .iter()
                .map(|&soft| {
                    if soft {
                        Event::SoftBreak
                    } else {
                        Event::Text(CowStr::from("line"))
                    }
                })
                .collect();

            let out: Vec<_> = events
                .into_iter()
                .with_transformer::<LineBreakTransformer<_>>()
                .collect();

            prop_assert_eq!(out.len(), layout.len());
            prop_assert!(!out.iter().any(|e| matches!(e, Event::SoftBreak)));
            let hard = out.iter().filter(|e| matches!(e, Event::HardBreak)).count();
            prop_assert_eq!(hard, layout.iter().filter(|&&s| s).count());
            Ok(())
        })
        .unwrap();
}
