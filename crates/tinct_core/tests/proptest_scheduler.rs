//! Property-based tests for the frame scheduler.
//!
//! 1. Requests for one kind coalesce into a single task per frame
//! 2. Requests made while a frame is in flight run on the following frame
//! 3. Nothing runs twice and nothing is lost

use proptest::prelude::*;
use tinct_core::FrameScheduler;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Reapply,
    Republish,
}

#[derive(Clone, Copy, Debug)]
enum Op {
    Request(Kind),
    Cancel(Kind),
    Frame,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let kind = prop_oneof![Just(Kind::Reapply), Just(Kind::Republish)];
    prop_oneof![
        4 => kind.clone().prop_map(Op::Request),
        1 => kind.prop_map(Op::Cancel),
        2 => Just(Op::Frame),
    ]
}

proptest! {
    #[test]
    fn each_kind_runs_at_most_once_per_frame(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut scheduler = FrameScheduler::new();
        for op in ops {
            match op {
                Op::Request(kind) => {
                    scheduler.request(kind);
                }
                Op::Cancel(kind) => {
                    scheduler.cancel(kind);
                }
                Op::Frame => {
                    let tasks = scheduler.begin_frame();
                    let reapply = tasks.iter().filter(|t| t.kind == Kind::Reapply).count();
                    let republish = tasks.iter().filter(|t| t.kind == Kind::Republish).count();
                    prop_assert!(reapply <= 1);
                    prop_assert!(republish <= 1);
                    prop_assert!(tasks.iter().all(|t| t.requested_at < scheduler.frame()));
                    scheduler.finish_frame();
                }
            }
        }
    }

    #[test]
    fn requests_during_flight_are_deferred(burst in 1usize..16) {
        let mut scheduler = FrameScheduler::new();
        scheduler.request(Kind::Reapply);

        let first = scheduler.begin_frame();
        prop_assert_eq!(first.len(), 1);
        for _ in 0..burst {
            scheduler.request(Kind::Reapply);
        }
        prop_assert!(scheduler.begin_frame().is_empty());
        scheduler.finish_frame();

        let second = scheduler.begin_frame();
        prop_assert_eq!(second.len(), 1);
        prop_assert_eq!(second[0].requests as usize, burst);
        scheduler.finish_frame();

        prop_assert!(!scheduler.has_pending());
    }
}
