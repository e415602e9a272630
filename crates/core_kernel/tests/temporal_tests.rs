//! Tests for clocks and audit stamping

use chrono::{Duration, TimeZone, Utc};
use core_kernel::{Actor, AuditInfo, Clock, FixedClock, SystemClock};

#[test]
fn test_system_clock_is_roughly_now() {
    let before = Utc::now();
    let observed = SystemClock.now();
    let after = Utc::now();
    assert!(before <= observed && observed <= after);
}

#[test]
fn test_fixed_clock_set_and_advance() {
    let start = Utc.with_ymd_and_hms(2017, 6, 1, 12, 0, 0).unwrap();
    let clock = FixedClock::at(start);
    assert_eq!(clock.now(), start);

    clock.advance(Duration::seconds(2));
    assert_eq!(clock.now(), start + Duration::seconds(2));

    let later = Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).unwrap();
    clock.set(later);
    assert_eq!(clock.now(), later);
}

#[test]
fn test_created_audit_mirrors_creation() {
    let at = Utc.with_ymd_and_hms(2017, 6, 1, 12, 0, 0).unwrap();
    let audit = AuditInfo::created(&Actor::new("operator"), at);

    assert_eq!(audit.created_by(), audit.last_modified_by());
    assert_eq!(audit.created_on(), audit.last_modified_on());
}

#[test]
fn test_audit_serializes_actor_as_string() {
    let at = Utc.with_ymd_and_hms(2017, 6, 1, 12, 0, 0).unwrap();
    let audit = AuditInfo::created(&Actor::new("operator"), at);
    let json = serde_json::to_value(&audit).unwrap();
    assert_eq!(json["createdBy"], "operator");
}
