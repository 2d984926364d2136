//! Tests for role allocation.

use castforge_config::CastingOrderConfig;
use castforge_core::{
    Applicant, CastGroup, Criteria, Gender, Requirement, RequirementKind, Role, Show,
};
use castforge_test::{balance_fixture, lead_fixture, revue, BalanceFixture};

use super::*;
use crate::applicant_engine::WeightedSumEngine;
use crate::casting_order::CastingBatch;

fn engine() -> HeuristicAllocationEngine {
    HeuristicAllocationEngine::new(
        Box::new(WeightedSumEngine::new()),
        CastingOrderConfig::default(),
    )
}

fn pool(show: &Show) -> Vec<ApplicantId> {
    show.applicant_ids().collect()
}

#[test]
fn test_pick_cast_takes_most_suitable() {
    let f = lead_fixture();
    let picked = engine().pick_cast(&f.show, &pool(&f.show), f.role);
    assert_eq!(picked, vec![f.applicants[0], f.applicants[1]]);
}

#[test]
fn test_pick_cast_fills_only_remaining_places() {
    let mut f = lead_fixture();
    f.show.cast(f.role, f.applicants[0]);
    let picked = engine().pick_cast(&f.show, &pool(&f.show), f.role);
    assert_eq!(picked, vec![f.applicants[1]]);
}

#[test]
fn test_pick_cast_skips_unavailable_applicants() {
    let mut f = lead_fixture();
    let other = f
        .show
        .add_role(&[f.item], Role::new("Narrator").with_count(f.group, 1));
    f.show.cast(other, f.applicants[0]);

    let picked = engine().pick_cast(&f.show, &pool(&f.show), f.role);
    assert_eq!(picked, vec![f.applicants[1], f.applicants[2]]);
}

#[test]
fn test_pick_cast_does_not_modify_the_show() {
    let f = lead_fixture();
    let before = f.show.clone();
    engine().pick_cast(&f.show, &pool(&f.show), f.role);
    assert_eq!(f.show, before);
}

/// Four ensemble members, Red: 0 (#1) and 2 (#2), Blue: 1 (#2) and 3 (#1).
fn numbered_ensemble() -> BalanceFixture {
    let mut f = balance_fixture(&[90, 80, 70, 60]);
    let [red, blue] = f.casts;
    for (i, (cast, number)) in [(red, 1), (blue, 2), (red, 2), (blue, 1)].into_iter().enumerate() {
        let a = f.show.applicant_mut(f.applicants[i]);
        a.alternative_cast = Some(cast);
        a.cast_number = Some(number);
    }
    f
}

#[test]
fn test_pick_cast_keeps_buddies_together_for_open_roles() {
    let mut f = numbered_ensemble();
    let item = f.show.add_item(f.show.root(), "Number");
    let role = f
        .show
        .add_role(&[item], Role::new("Chorus").with_count(f.group, 1));

    let picked = engine().pick_cast(&f.show, &pool(&f.show), role);
    // Applicant 3 shares cast number 1 with applicant 0.
    assert_eq!(picked, vec![f.applicants[0], f.applicants[3]]);
}

#[test]
fn test_pick_cast_ranks_per_cast_when_role_has_requirements() {
    let mut f = numbered_ensemble();
    let singer = f.show.add_requirement(Requirement::new(
        "Singer",
        RequirementKind::AbilityRange {
            criteria: f.singing,
            minimum: None,
            maximum: None,
            scale_suitability: true,
        },
    ));
    let item = f.show.add_item(f.show.root(), "Solo");
    let role = f.show.add_role(
        &[item],
        Role::new("Soloist")
            .with_requirement(singer)
            .with_count(f.group, 1),
    );

    let picked = engine().pick_cast(&f.show, &pool(&f.show), role);
    assert_eq!(picked, vec![f.applicants[0], f.applicants[1]]);
}

#[test]
fn test_pick_cast_ignores_members_without_an_alternative_cast() {
    let mut f = balance_fixture(&[90, 80, 70]);
    f.show.applicant_mut(f.applicants[1]).alternative_cast = Some(f.casts[0]);
    f.show.applicant_mut(f.applicants[2]).alternative_cast = Some(f.casts[1]);
    let item = f.show.add_item(f.show.root(), "Number");
    let role = f
        .show
        .add_role(&[item], Role::new("Chorus").with_count(f.group, 1));

    let picked = engine().pick_cast(&f.show, &pool(&f.show), role);
    assert_eq!(picked, vec![f.applicants[1], f.applicants[2]]);
}

struct Duet {
    show: Show,
    open: RoleId,
    female_only: RoleId,
    strong: ApplicantId,
    weak: ApplicantId,
}

/// Two roles in one item; only the stronger applicant fits both.
fn duet() -> Duet {
    let mut show = Show::new("Duet");
    let acting = show.add_criteria(Criteria::new("Acting", 100));
    let group = show.add_cast_group(CastGroup::new("Cast"));
    let female = show.add_requirement(Requirement::new(
        "Female",
        RequirementKind::Gender {
            required_value: Gender::Female,
        },
    ));
    let item = show.add_item(show.root(), "Duet");
    let open = show.add_role(&[item], Role::new("Open").with_count(group, 1));
    let female_only = show.add_role(
        &[item],
        Role::new("Female only")
            .with_requirement(female)
            .with_count(group, 1),
    );
    let mut add = |name: &str, gender: Gender, mark: u32| {
        let mut applicant = Applicant::new(name, "")
            .with_gender(gender)
            .with_mark(acting, mark);
        applicant.cast_group = Some(group);
        show.add_applicant(applicant)
    };
    let strong = add("Strong", Gender::Female, 90);
    let weak = add("Weak", Gender::Male, 50);
    Duet {
        show,
        open,
        female_only,
        strong,
        weak,
    }
}

#[test]
fn test_balance_cast_serves_roles_that_need_their_whole_queue_first() {
    let mut d = duet();
    let applicants = pool(&d.show);
    let cast = engine().balance_cast(&mut d.show, &applicants, &[d.open, d.female_only]);

    assert_eq!(cast, vec![(d.female_only, d.strong), (d.open, d.weak)]);
    assert_eq!(d.show.role(d.open).cast, vec![d.weak]);
    assert_eq!(d.show.role(d.female_only).cast, vec![d.strong]);
}

#[test]
fn test_greedy_pick_would_take_the_shared_applicant() {
    let d = duet();
    let picked = engine().pick_cast(&d.show, &pool(&d.show), d.open);
    assert_eq!(picked, vec![d.strong]);
}

#[test]
fn test_balance_cast_alternates_between_roles() {
    let mut show = Show::new("Alternate");
    let group = show.add_cast_group(CastGroup::new("Cast"));
    let singing = show.add_criteria(Criteria::new("Singing", 100));
    let item = show.add_item(show.root(), "Number");
    let sopranos = show.add_role(&[item], Role::new("Sopranos").with_count(group, 2));
    let altos = show.add_role(&[item], Role::new("Altos").with_count(group, 2));
    let applicants: Vec<ApplicantId> = [90, 80, 70, 60]
        .into_iter()
        .enumerate()
        .map(|(i, mark)| {
            let mut applicant = Applicant::new(format!("S{i}"), "").with_mark(singing, mark);
            applicant.cast_group = Some(group);
            show.add_applicant(applicant)
        })
        .collect();

    let cast = engine().balance_cast(&mut show, &applicants, &[sopranos, altos]);
    assert_eq!(cast.len(), 4);
    assert_eq!(show.role(sopranos).cast, vec![applicants[0], applicants[2]]);
    assert_eq!(show.role(altos).cast, vec![applicants[1], applicants[3]]);
}

#[test]
fn test_balance_cast_fills_each_alternative_cast() {
    let mut f = balance_fixture(&[90, 80, 70, 60]);
    let [red, blue] = f.casts;
    for (i, cast) in [red, blue, red, blue].into_iter().enumerate() {
        f.show.applicant_mut(f.applicants[i]).alternative_cast = Some(cast);
    }
    let item = f.show.add_item(f.show.root(), "Number");
    let role = f
        .show
        .add_role(&[item], Role::new("Chorus").with_count(f.group, 2));
    let applicants = f.applicants.clone();

    let cast = engine().balance_cast(&mut f.show, &applicants, &[role]);
    assert_eq!(cast.len(), 4);
    assert_eq!(f.show.role(role).cast.len(), 4);
}

#[test]
fn test_balance_cast_stops_when_candidates_run_out() {
    let mut f = lead_fixture();
    let big = f
        .show
        .add_role(&[f.item], Role::new("Crowd").with_count(f.group, 5));
    let applicants = pool(&f.show);

    let cast = engine().balance_cast(&mut f.show, &applicants, &[big]);
    assert_eq!(cast.len(), 3);
}

#[test]
fn test_count_roles_filters_by_criteria_and_exclusion() {
    let mut show = Show::new("Counting");
    let singing = show.add_criteria(Criteria::new("Singing", 100));
    let dancing = show.add_criteria(Criteria::new("Dancing", 100));
    let group = show.add_cast_group(CastGroup::new("Cast"));
    let singer = show.add_requirement(Requirement::new(
        "Singer",
        RequirementKind::AbilityRange {
            criteria: singing,
            minimum: Some(50),
            maximum: None,
            scale_suitability: false,
        },
    ));
    let not_singer = show.add_requirement(Requirement::new(
        "Not a singer",
        RequirementKind::Not {
            sub_requirement: singer,
        },
    ));
    let first = show.add_item(show.root(), "First");
    let second = show.add_item(show.root(), "Second");
    let third = show.add_item(show.root(), "Third");
    let solo = show.add_role(
        &[first],
        Role::new("Solo").with_requirement(singer).with_count(group, 1),
    );
    let mime = show.add_role(
        &[second],
        Role::new("Mime")
            .with_requirement(not_singer)
            .with_count(group, 1),
    );
    let crowd = show.add_role(&[third], Role::new("Crowd").with_count(group, 1));
    let applicant = show.add_applicant(Applicant::new("Ada", ""));
    for role in [solo, mime, crowd] {
        show.cast(role, applicant);
    }

    let e = engine();
    assert_eq!(e.count_roles(&show, applicant, None, None), 3);
    assert_eq!(e.count_roles(&show, applicant, Some(singing), None), 2);
    assert_eq!(e.count_roles(&show, applicant, Some(dancing), None), 0);
    assert_eq!(e.count_roles(&show, applicant, None, Some(crowd)), 2);
    assert_eq!(e.count_roles(&show, applicant, Some(singing), Some(solo)), 1);
}

#[test]
fn test_queries_agree_with_their_detail() {
    let mut d = duet();
    d.show.cast(d.open, d.strong);
    let e = engine();
    for applicant in [d.strong, d.weak] {
        for role in [d.open, d.female_only] {
            assert_eq!(
                e.is_eligible(&d.show, applicant, role),
                e.eligibility_of(&d.show, applicant, role).is_eligible()
            );
            assert_eq!(
                e.is_available(&d.show, applicant, role),
                e.availability_of(&d.show, applicant, role).is_available()
            );
        }
    }
    assert_eq!(
        e.eligibility_of(&d.show, d.weak, d.female_only)
            .requirements_not_met
            .len(),
        1
    );
    assert!(!e.is_available(&d.show, d.strong, d.female_only));
    assert!(e.is_available(&d.show, d.weak, d.female_only));
}

#[test]
fn test_suitability_uses_overall_ability_for_open_roles() {
    let d = duet();
    let e = engine();
    assert!((e.suitability_of(&d.show, d.strong, d.open) - 0.9).abs() < 1e-9);
    assert_eq!(e.suitability_of(&d.show, d.weak, d.female_only), 0.0);
    assert_eq!(e.suitability_of(&d.show, d.strong, d.female_only), 1.0);
}

#[test]
fn test_engine_plans_the_casting_order() {
    let r = revue();
    let batches = engine()
        .ideal_casting_order(&r.show, &r.applicants)
        .into_batches(&r.show);
    assert_eq!(batches.first(), Some(&CastingBatch::Single(r.chorus)));
    assert_eq!(batches.len(), 4);
}
