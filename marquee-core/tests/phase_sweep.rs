use marquee_core::constants::{MS_PER_DAY, MS_PER_MINUTE};
use marquee_core::{LabelSet, Phase, PhaseClock, ReservationWindow, Timestamp, offset_from_minutes};

const OFFSETS: [i32; 5] = [-600, -300, 0, 330, 540];

fn clock(offset_minutes: i32) -> PhaseClock {
    PhaseClock::new(
        offset_from_minutes(offset_minutes).unwrap(),
        LabelSet::english(),
        1_000,
    )
}

/// Sweeps `now` across four days before and one day into a fixed sale in
/// 17-minute steps, checking every rule that does not depend on labels.
#[test]
fn phase_rules_hold_across_offsets() {
    let start = Timestamp::from_millis(1_767_225_600_000);
    let end = start.saturating_add_ms(MS_PER_DAY / 2);
    let window = ReservationWindow::from_timestamps(start, end);

    for offset_minutes in OFFSETS {
        let clock = clock(offset_minutes);
        let offset = clock.offset();
        let mut now = start.saturating_add_ms(-4 * MS_PER_DAY);
        while now <= end.saturating_add_ms(MS_PER_DAY) {
            let result = clock.evaluate(now, &window);
            assert!(result.remaining_ms >= 0);
            assert_eq!(result.disabled, result.phase != Phase::Open);
            assert_eq!(
                result.remaining_ms == 0,
                matches!(result.phase, Phase::Open | Phase::Ended)
            );

            if now > end {
                assert_eq!(result.phase, Phase::Ended);
            } else if now >= start {
                assert_eq!(result.phase, Phase::Open);
            } else {
                let diff = start.as_millis() - now.as_millis();
                assert_eq!(result.remaining_ms, diff);
                if now.local_day(offset) == start.local_day(offset) {
                    assert_eq!(result.phase, Phase::Today);
                } else if diff <= MS_PER_DAY {
                    assert_eq!(result.phase, Phase::DMinus1);
                } else {
                    assert_eq!(result.phase, Phase::Before);
                    let days = (diff + MS_PER_DAY - 1) / MS_PER_DAY;
                    assert_eq!(result.button_label, format!("D-{days}"));
                }
            }
            assert_eq!(result, clock.evaluate(now, &window));
            now = now.saturating_add_ms(17 * MS_PER_MINUTE);
        }
    }
}

#[test]
fn unknown_bounds_fail_safe_for_every_offset() {
    for offset_minutes in OFFSETS {
        for (start, end) in [("", ""), ("tbd", "2026-01-01"), ("2026-01-01", " ")] {
            let result = clock(offset_minutes).evaluate_raw(Timestamp::from_millis(0), start, end);
            assert_eq!(result.phase, Phase::Before);
            assert!(result.disabled);
            assert_eq!(result.remaining_ms, 0);
            assert_eq!(result.button_label, "Scheduled");
            assert_eq!(result.helper_text, None);
        }
    }
}
