//! Pure rules: each looks at a finished run (and the JVM options, when the
//! log carried them) and raises at most one finding.

use std::collections::BTreeSet;

use super::catalog::Finding;
use super::collector::CollectorVerdict;
use super::options::JvmOptions;
use crate::event::Trigger;
use crate::parser::{Collector, EventType};
use crate::run::JvmRun;

pub type Rule = fn(&JvmRun, Option<&JvmOptions>) -> Option<Finding>;

/// First event later than this after JVM start means the log is partial.
pub const FIRST_TIMESTAMP_THRESHOLD_MS: u64 = 60_000;

/// Thread stacks above this size (KB) are flagged.
pub const THREAD_STACK_THRESHOLD_KB: u64 = 1024;

pub const RULES: &[Rule] = &[
    application_stopped_time_missing,
    explicit_gc_unknown,
    explicit_gc_serial,
    explicit_gc_parallel,
    explicit_gc_serial_cms,
    explicit_gc_serial_g1,
    explicit_gc_shenandoah,
    explicit_gc_disabled,
    unknown_collector,
    unknown_collector_combination,
    cms_par_new_disabled,
    par_new_serial_old,
    parallel_serial_old,
    serial_gc,
    cms_serial_old,
    cms_concurrent_mode_failure,
    cms_promotion_failed,
    g1_evacuation_failure,
    g1_full_gc,
    shenandoah_degenerated_gc,
    shenandoah_full_gc,
    z_allocation_stall,
    gc_locker,
    gc_time_limit_exceeded,
    metaspace_threshold,
    metaspace_allocation_failure,
    heap_inspection_gc,
    heap_dump_gc,
    parallelism_inverted,
    throughput_bottleneck,
    first_timestamp_threshold_exceeded,
    unidentified_log_lines,
    no_gc_events,
    print_gc_details_missing,
    heap_min_not_equal_max,
    print_heap_at_gc,
    print_gc_application_concurrent_time,
    print_class_histogram,
    print_fls_statistics,
    trace_class_unloading,
    print_reference_gc,
    biased_locking_disabled,
    cms_class_unloading_disabled,
    cms_init_occupancy_only_missing,
    gc_log_file_rotation_not_enabled,
    thread_stack_size_large,
    print_gc_cause_disabled,
];

pub fn evaluate(run: &JvmRun, options: Option<&JvmOptions>) -> BTreeSet<Finding> {
    RULES.iter().filter_map(|rule| rule(run, options)).collect()
}

fn raise(condition: bool, finding: Finding) -> Option<Finding> {
    condition.then_some(finding)
}

fn option(options: Option<&JvmOptions>, check: impl Fn(&JvmOptions) -> bool, finding: Finding) -> Option<Finding> {
    raise(options.is_some_and(check), finding)
}

fn explicit_on(run: &JvmRun, types: &[EventType], finding: Finding) -> Option<Finding> {
    raise(types.iter().any(|t| run.is_explicit(*t)), finding)
}

fn unforced_on(run: &JvmRun, types: &[EventType], finding: Finding) -> Option<Finding> {
    raise(types.iter().any(|t| run.is_unforced(*t)), finding)
}

// ── Instrumentation ─────────────────────────────────────────────

fn application_stopped_time_missing(run: &JvmRun, options: Option<&JvmOptions>) -> Option<Finding> {
    let logged = options.is_some_and(|o| o.is_enabled("PrintGCApplicationStoppedTime") || o.logs_tag("safepoint"));
    raise(
        run.blocking_count() > 0 && !logged && !run.has_type(EventType::ApplicationStoppedTime),
        Finding::ApplicationStoppedTimeMissing,
    )
}

fn unidentified_log_lines(run: &JvmRun, _: Option<&JvmOptions>) -> Option<Finding> {
    raise(run.unidentified_count() > 0, Finding::UnidentifiedLogLines)
}

fn no_gc_events(run: &JvmRun, _: Option<&JvmOptions>) -> Option<Finding> {
    raise(run.reportable_count() == 0, Finding::NoGcEvents)
}

fn first_timestamp_threshold_exceeded(run: &JvmRun, _: Option<&JvmOptions>) -> Option<Finding> {
    raise(
        run.first_timestamp().is_some_and(|ts| ts > FIRST_TIMESTAMP_THRESHOLD_MS),
        Finding::FirstTimestampThresholdExceeded,
    )
}

// ── Explicit collections ────────────────────────────────────────

fn explicit_gc_unknown(run: &JvmRun, _: Option<&JvmOptions>) -> Option<Finding> {
    explicit_on(
        run,
        &[
            EventType::UnifiedYoung,
            EventType::UnifiedOld,
            EventType::VerboseGcYoung,
            EventType::VerboseGcOld,
        ],
        Finding::ExplicitGcUnknown,
    )
}

fn explicit_gc_serial(run: &JvmRun, _: Option<&JvmOptions>) -> Option<Finding> {
    explicit_on(run, &[EventType::SerialOld, EventType::UnifiedSerialOld], Finding::ExplicitGcSerial)
}

fn explicit_gc_parallel(run: &JvmRun, _: Option<&JvmOptions>) -> Option<Finding> {
    explicit_on(
        run,
        &[
            EventType::ParallelCompactingOld,
            EventType::UnifiedParallelCompactingOld,
            EventType::ParallelSerialOld,
            EventType::UnifiedParallelSerialOld,
        ],
        Finding::ExplicitGcParallel,
    )
}

fn explicit_gc_serial_cms(run: &JvmRun, _: Option<&JvmOptions>) -> Option<Finding> {
    explicit_on(run, &[EventType::CmsSerialOld], Finding::ExplicitGcSerialCms)
}

fn explicit_gc_serial_g1(run: &JvmRun, _: Option<&JvmOptions>) -> Option<Finding> {
    explicit_on(run, &[EventType::G1FullGc, EventType::UnifiedG1FullGc], Finding::ExplicitGcSerialG1)
}

fn explicit_gc_shenandoah(run: &JvmRun, _: Option<&JvmOptions>) -> Option<Finding> {
    explicit_on(run, &[EventType::ShenandoahFullGc], Finding::ExplicitGcShenandoah)
}

fn explicit_gc_disabled(_: &JvmRun, options: Option<&JvmOptions>) -> Option<Finding> {
    option(options, |o| o.is_enabled("DisableExplicitGC"), Finding::ExplicitGcDisabled)
}

// ── Collector selection ─────────────────────────────────────────

fn unknown_collector(run: &JvmRun, _: Option<&JvmOptions>) -> Option<Finding> {
    raise(
        run.blocking_count() > 0 && run.collector() == CollectorVerdict::Unknown,
        Finding::UnknownCollector,
    )
}

fn unknown_collector_combination(run: &JvmRun, _: Option<&JvmOptions>) -> Option<Finding> {
    raise(run.collector() == CollectorVerdict::Invalid, Finding::UnknownCollectorCombination)
}

fn cms_par_new_disabled(run: &JvmRun, _: Option<&JvmOptions>) -> Option<Finding> {
    raise(run.collector().is(Collector::SerialNew, Collector::Cms), Finding::CmsParNewDisabled)
}

fn par_new_serial_old(run: &JvmRun, _: Option<&JvmOptions>) -> Option<Finding> {
    raise(run.collector().is(Collector::ParNew, Collector::SerialOld), Finding::ParNewSerialOld)
}

fn parallel_serial_old(run: &JvmRun, _: Option<&JvmOptions>) -> Option<Finding> {
    unforced_on(
        run,
        &[EventType::ParallelSerialOld, EventType::UnifiedParallelSerialOld],
        Finding::ParallelSerialOld,
    )
}

fn serial_gc(run: &JvmRun, _: Option<&JvmOptions>) -> Option<Finding> {
    let serial = matches!(
        run.collector(),
        CollectorVerdict::Known {
            young: Some(Collector::SerialNew),
            old: Some(Collector::SerialOld) | None,
        } | CollectorVerdict::Known {
            young: None,
            old: Some(Collector::SerialOld),
        }
    );
    raise(serial && !run.has_type(EventType::ParallelSerialOld), Finding::SerialGc)
}

// ── Collector trouble ───────────────────────────────────────────

fn cms_serial_old(run: &JvmRun, _: Option<&JvmOptions>) -> Option<Finding> {
    unforced_on(run, &[EventType::CmsSerialOld], Finding::CmsSerialOld)
}

fn cms_concurrent_mode_failure(run: &JvmRun, _: Option<&JvmOptions>) -> Option<Finding> {
    raise(run.has_trigger(&Trigger::ConcurrentModeFailure), Finding::CmsConcurrentModeFailure)
}

fn cms_promotion_failed(run: &JvmRun, _: Option<&JvmOptions>) -> Option<Finding> {
    raise(run.has_trigger(&Trigger::PromotionFailed), Finding::CmsPromotionFailed)
}

fn g1_evacuation_failure(run: &JvmRun, _: Option<&JvmOptions>) -> Option<Finding> {
    raise(
        run.has_trigger(&Trigger::ToSpaceExhausted) || run.has_trigger(&Trigger::ToSpaceOverflow),
        Finding::G1EvacuationFailure,
    )
}

fn g1_full_gc(run: &JvmRun, _: Option<&JvmOptions>) -> Option<Finding> {
    unforced_on(run, &[EventType::G1FullGc, EventType::UnifiedG1FullGc], Finding::G1FullGc)
}

fn shenandoah_degenerated_gc(run: &JvmRun, _: Option<&JvmOptions>) -> Option<Finding> {
    raise(
        run.event_types().iter().any(EventType::is_shenandoah_degenerated),
        Finding::ShenandoahDegeneratedGc,
    )
}

fn shenandoah_full_gc(run: &JvmRun, _: Option<&JvmOptions>) -> Option<Finding> {
    unforced_on(run, &[EventType::ShenandoahFullGc], Finding::ShenandoahFullGc)
}

fn z_allocation_stall(run: &JvmRun, _: Option<&JvmOptions>) -> Option<Finding> {
    raise(run.has_type(EventType::ZAllocationStall), Finding::ZAllocationStall)
}

fn gc_locker(run: &JvmRun, _: Option<&JvmOptions>) -> Option<Finding> {
    raise(
        run.has_type(EventType::GcLocker) || run.has_trigger(&Trigger::GcLocker),
        Finding::GcLocker,
    )
}

fn gc_time_limit_exceeded(run: &JvmRun, _: Option<&JvmOptions>) -> Option<Finding> {
    raise(run.has_type(EventType::GcOverheadLimit), Finding::GcTimeLimitExceeded)
}

fn metaspace_threshold(run: &JvmRun, _: Option<&JvmOptions>) -> Option<Finding> {
    raise(run.has_trigger(&Trigger::MetadataGcThreshold), Finding::MetaspaceThreshold)
}

fn metaspace_allocation_failure(run: &JvmRun, _: Option<&JvmOptions>) -> Option<Finding> {
    raise(run.has_trigger(&Trigger::LastDitchCollection), Finding::MetaspaceAllocationFailure)
}

fn heap_inspection_gc(run: &JvmRun, _: Option<&JvmOptions>) -> Option<Finding> {
    raise(run.has_trigger(&Trigger::HeapInspection), Finding::HeapInspectionGc)
}

fn heap_dump_gc(run: &JvmRun, _: Option<&JvmOptions>) -> Option<Finding> {
    raise(run.has_trigger(&Trigger::HeapDump), Finding::HeapDumpGc)
}

fn parallelism_inverted(run: &JvmRun, _: Option<&JvmOptions>) -> Option<Finding> {
    raise(run.inverted_parallelism_count() > 0, Finding::ParallelismInverted)
}

fn throughput_bottleneck(run: &JvmRun, _: Option<&JvmOptions>) -> Option<Finding> {
    raise(run.is_bottleneck(), Finding::ThroughputBottleneck)
}

// ── JVM options ─────────────────────────────────────────────────

fn print_gc_details_missing(_: &JvmRun, options: Option<&JvmOptions>) -> Option<Finding> {
    option(
        options,
        |o| !o.is_unified() && !o.is_enabled("PrintGCDetails"),
        Finding::PrintGcDetailsMissing,
    )
}

fn heap_min_not_equal_max(_: &JvmRun, options: Option<&JvmOptions>) -> Option<Finding> {
    option(
        options,
        |o| matches!((o.heap_min(), o.heap_max()), (Some(min), Some(max)) if min != max),
        Finding::HeapMinNotEqualMax,
    )
}

fn print_heap_at_gc(_: &JvmRun, options: Option<&JvmOptions>) -> Option<Finding> {
    option(options, |o| o.is_enabled("PrintHeapAtGC"), Finding::PrintHeapAtGc)
}

fn print_gc_application_concurrent_time(_: &JvmRun, options: Option<&JvmOptions>) -> Option<Finding> {
    option(
        options,
        |o| o.is_enabled("PrintGCApplicationConcurrentTime"),
        Finding::PrintGcApplicationConcurrentTime,
    )
}

fn print_class_histogram(_: &JvmRun, options: Option<&JvmOptions>) -> Option<Finding> {
    option(options, |o| o.has_prefix("-XX:+PrintClassHistogram"), Finding::PrintClassHistogram)
}

fn print_fls_statistics(_: &JvmRun, options: Option<&JvmOptions>) -> Option<Finding> {
    option(options, |o| o.value("PrintFLSStatistics").is_some(), Finding::PrintFlsStatistics)
}

fn trace_class_unloading(_: &JvmRun, options: Option<&JvmOptions>) -> Option<Finding> {
    option(options, |o| o.is_enabled("TraceClassUnloading"), Finding::TraceClassUnloading)
}

fn print_reference_gc(_: &JvmRun, options: Option<&JvmOptions>) -> Option<Finding> {
    option(options, |o| o.is_enabled("PrintReferenceGC"), Finding::PrintReferenceGc)
}

fn biased_locking_disabled(_: &JvmRun, options: Option<&JvmOptions>) -> Option<Finding> {
    option(options, |o| o.is_disabled("UseBiasedLocking"), Finding::BiasedLockingDisabled)
}

fn cms_class_unloading_disabled(_: &JvmRun, options: Option<&JvmOptions>) -> Option<Finding> {
    option(options, |o| o.is_disabled("CMSClassUnloadingEnabled"), Finding::CmsClassUnloadingDisabled)
}

fn cms_init_occupancy_only_missing(_: &JvmRun, options: Option<&JvmOptions>) -> Option<Finding> {
    option(
        options,
        |o| o.value("CMSInitiatingOccupancyFraction").is_some() && !o.is_enabled("UseCMSInitiatingOccupancyOnly"),
        Finding::CmsInitOccupancyOnlyMissing,
    )
}

fn gc_log_file_rotation_not_enabled(_: &JvmRun, options: Option<&JvmOptions>) -> Option<Finding> {
    option(
        options,
        |o| o.has_prefix("-Xloggc:") && !o.is_enabled("UseGCLogFileRotation"),
        Finding::GcLogFileRotationNotEnabled,
    )
}

fn thread_stack_size_large(_: &JvmRun, options: Option<&JvmOptions>) -> Option<Finding> {
    option(
        options,
        |o| o.thread_stack_kb().is_some_and(|kb| kb > THREAD_STACK_THRESHOLD_KB),
        Finding::ThreadStackSizeLarge,
    )
}

fn print_gc_cause_disabled(_: &JvmRun, options: Option<&JvmOptions>) -> Option<Finding> {
    option(options, |o| o.is_disabled("PrintGCCause"), Finding::PrintGcCauseDisabled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{build_event, Event};

    fn run_of(lines: &[&str]) -> JvmRun {
        JvmRun::from_events(lines.iter().map(|line| build_event(line).unwrap()), 90)
    }

    fn pause(event_type: EventType, trigger: Option<Trigger>) -> Event {
        let mut event = Event::new(event_type, "");
        event.timestamp = Some(1);
        event.duration = Some(10);
        event.trigger = trigger;
        event
    }

    fn findings(events: Vec<Event>) -> BTreeSet<Finding> {
        JvmRun::from_events(events, 0).analysis().clone()
    }

    #[test]
    fn test_every_finding_has_a_rule() {
        assert_eq!(RULES.len(), Finding::ALL.len());
    }

    // ── Instrumentation ─────────────────────────────────────────

    #[test]
    fn test_stopped_time_missing_raised_once() {
        let run = run_of(&[
            "[0.231s][info][gc] GC(6) Pause Full (Ergonomics) 1M->1M(7M) 2.969ms",
            "[0.300s][info][gc] GC(7) Pause Full (Ergonomics) 1M->1M(7M) 2.969ms",
        ]);
        let stopped: Vec<_> = run
            .analysis()
            .iter()
            .filter(|f| **f == Finding::ApplicationStoppedTimeMissing)
            .collect();
        assert_eq!(stopped.len(), 1);
    }

    #[test]
    fn test_stopped_time_present() {
        let run = run_of(&[
            "[0.231s][info][gc] GC(6) Pause Full (Ergonomics) 1M->1M(7M) 2.969ms",
            "[0.232s][info][safepoint] Total time for which application threads were stopped: 0.0030000 seconds",
        ]);
        assert!(!run.has_finding(Finding::ApplicationStoppedTimeMissing));
    }

    #[test]
    fn test_stopped_time_option_enabled() {
        let run = run_of(&[
            "CommandLine flags: -XX:+PrintGCDetails -XX:+PrintGCApplicationStoppedTime",
            "[0.231s][info][gc] GC(6) Pause Full (Ergonomics) 1M->1M(7M) 2.969ms",
        ]);
        assert!(!run.has_finding(Finding::ApplicationStoppedTimeMissing));
    }

    #[test]
    fn test_no_gc_events() {
        let run = run_of(&["random text", ""]);
        assert!(run.has_finding(Finding::NoGcEvents));
        assert!(run.has_finding(Finding::UnidentifiedLogLines));
        assert!(!run.has_finding(Finding::ApplicationStoppedTimeMissing));
        assert!(!run.has_finding(Finding::UnknownCollector));
    }

    #[test]
    fn test_first_timestamp_threshold() {
        let mut late = pause(EventType::SerialNew, None);
        late.timestamp = Some(60_001);
        assert!(findings(vec![late]).contains(&Finding::FirstTimestampThresholdExceeded));
        assert!(!findings(vec![pause(EventType::SerialNew, None)]).contains(&Finding::FirstTimestampThresholdExceeded));
    }

    // ── Explicit collections ────────────────────────────────────

    #[test]
    fn test_explicit_gc_by_collector() {
        let cases = [
            (EventType::UnifiedOld, Finding::ExplicitGcUnknown),
            (EventType::SerialOld, Finding::ExplicitGcSerial),
            (EventType::ParallelCompactingOld, Finding::ExplicitGcParallel),
            (EventType::CmsSerialOld, Finding::ExplicitGcSerialCms),
            (EventType::G1FullGc, Finding::ExplicitGcSerialG1),
            (EventType::ShenandoahFullGc, Finding::ExplicitGcShenandoah),
        ];
        for (event_type, finding) in cases {
            let found = findings(vec![pause(event_type, Some(Trigger::SystemGc))]);
            assert!(found.contains(&finding), "{} should raise {}", event_type, finding);
        }
    }

    #[test]
    fn test_explicit_full_is_not_a_failure() {
        let found = findings(vec![pause(EventType::G1FullGc, Some(Trigger::SystemGc))]);
        assert!(!found.contains(&Finding::G1FullGc));
        let found = findings(vec![pause(EventType::CmsSerialOld, Some(Trigger::SystemGc))]);
        assert!(!found.contains(&Finding::CmsSerialOld));
    }

    // ── Collector selection ─────────────────────────────────────

    #[test]
    fn test_collector_combinations() {
        let found = findings(vec![pause(EventType::SerialNew, None), pause(EventType::CmsRemark, None)]);
        assert!(found.contains(&Finding::CmsParNewDisabled));

        let found = findings(vec![pause(EventType::ParNew, None), pause(EventType::SerialOld, None)]);
        assert!(found.contains(&Finding::ParNewSerialOld));
        assert!(!found.contains(&Finding::SerialGc));

        let found = findings(vec![pause(EventType::ParallelScavenge, None), pause(EventType::ParallelSerialOld, None)]);
        assert!(found.contains(&Finding::ParallelSerialOld));
        assert!(!found.contains(&Finding::SerialGc));

        let found = findings(vec![pause(EventType::SerialNew, None), pause(EventType::SerialOld, None)]);
        assert!(found.contains(&Finding::SerialGc));

        let found = findings(vec![pause(EventType::G1YoungPause, None), pause(EventType::ParNew, None)]);
        assert!(found.contains(&Finding::UnknownCollectorCombination));
    }

    #[test]
    fn test_unknown_collector() {
        let found = findings(vec![pause(EventType::VerboseGcYoung, None)]);
        assert!(found.contains(&Finding::UnknownCollector));
    }

    // ── Collector trouble ───────────────────────────────────────

    #[test]
    fn test_failure_triggers() {
        let cases = [
            (Trigger::ConcurrentModeFailure, Finding::CmsConcurrentModeFailure),
            (Trigger::PromotionFailed, Finding::CmsPromotionFailed),
            (Trigger::ToSpaceExhausted, Finding::G1EvacuationFailure),
            (Trigger::ToSpaceOverflow, Finding::G1EvacuationFailure),
            (Trigger::GcLocker, Finding::GcLocker),
            (Trigger::MetadataGcThreshold, Finding::MetaspaceThreshold),
            (Trigger::LastDitchCollection, Finding::MetaspaceAllocationFailure),
            (Trigger::HeapInspection, Finding::HeapInspectionGc),
            (Trigger::HeapDump, Finding::HeapDumpGc),
        ];
        for (trigger, finding) in cases {
            let found = findings(vec![pause(EventType::UnifiedYoung, Some(trigger.clone()))]);
            assert!(found.contains(&finding), "{} should raise {}", trigger, finding);
        }
    }

    #[test]
    fn test_collector_events() {
        assert!(findings(vec![pause(EventType::ShenandoahDegeneratedGcMark, None)])
            .contains(&Finding::ShenandoahDegeneratedGc));
        assert!(findings(vec![pause(EventType::ShenandoahFullGc, None)]).contains(&Finding::ShenandoahFullGc));
        assert!(findings(vec![pause(EventType::UnifiedG1FullGc, None)]).contains(&Finding::G1FullGc));
        assert!(findings(vec![pause(EventType::ZAllocationStall, None)]).contains(&Finding::ZAllocationStall));
        assert!(findings(vec![Event::new(EventType::GcOverheadLimit, "")]).contains(&Finding::GcTimeLimitExceeded));
        assert!(findings(vec![Event::new(EventType::GcLocker, "")]).contains(&Finding::GcLocker));
    }

    // ── JVM options ─────────────────────────────────────────────

    #[test]
    fn test_option_findings() {
        let run = run_of(&[
            "CommandLine flags: -XX:InitialHeapSize=1073741824 -XX:MaxHeapSize=2147483648 -XX:+PrintHeapAtGC \
             -XX:+PrintGCApplicationConcurrentTime -XX:+PrintClassHistogramAfterFullGC -XX:PrintFLSStatistics=1 \
             -XX:+TraceClassUnloading -XX:+PrintReferenceGC -XX:-UseBiasedLocking -XX:-CMSClassUnloadingEnabled \
             -XX:CMSInitiatingOccupancyFraction=70 -Xloggc:gc.log -Xss2m -XX:-PrintGCCause -XX:+DisableExplicitGC",
        ]);
        for finding in [
            Finding::PrintGcDetailsMissing,
            Finding::HeapMinNotEqualMax,
            Finding::PrintHeapAtGc,
            Finding::PrintGcApplicationConcurrentTime,
            Finding::PrintClassHistogram,
            Finding::PrintFlsStatistics,
            Finding::TraceClassUnloading,
            Finding::PrintReferenceGc,
            Finding::BiasedLockingDisabled,
            Finding::CmsClassUnloadingDisabled,
            Finding::CmsInitOccupancyOnlyMissing,
            Finding::GcLogFileRotationNotEnabled,
            Finding::ThreadStackSizeLarge,
            Finding::PrintGcCauseDisabled,
            Finding::ExplicitGcDisabled,
        ] {
            assert!(run.has_finding(finding), "missing {}", finding);
        }
    }

    #[test]
    fn test_clean_options() {
        let run = run_of(&[
            "CommandLine flags: -XX:InitialHeapSize=2147483648 -XX:MaxHeapSize=2147483648 -XX:+PrintGCDetails \
             -XX:CMSInitiatingOccupancyFraction=70 -XX:+UseCMSInitiatingOccupancyOnly -Xloggc:gc.log \
             -XX:+UseGCLogFileRotation -Xss1m",
        ]);
        let options: Vec<_> = run
            .analysis()
            .iter()
            .filter(|f| !matches!(f, Finding::NoGcEvents))
            .collect();
        assert!(options.is_empty(), "unexpected: {:?}", options);
    }

    #[test]
    fn test_unified_options_do_not_need_print_gc_details() {
        let opts = JvmOptions::parse("-Xlog:gc*:file=gc.log");
        let run = JvmRun::from_events(Vec::new(), 90);
        assert_eq!(print_gc_details_missing(&run, Some(&opts)), None);
        assert_eq!(print_gc_details_missing(&run, None), None);
    }
}
