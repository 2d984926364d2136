//! Show fixtures with known marks.

use castforge_core::{
    AlternativeCast, AlternativeCastId, Applicant, ApplicantId, CastGroup, CastGroupId, Criteria,
    CriteriaId, Gender, NodeId, Requirement, RequirementKind, Role, RoleId, SectionType, Show, Tag,
    TagId,
};

/// Two alternative casts and one alternating group.
#[derive(Debug, Clone)]
pub struct BalanceFixture {
    pub show: Show,
    pub applicants: Vec<ApplicantId>,
    pub group: CastGroupId,
    pub casts: [AlternativeCastId; 2],
    /// Primary criteria carrying the marks.
    pub singing: CriteriaId,
}

/// One accepted applicant per mark in an alternating "Ensemble" group,
/// marked on a single primary criteria.
pub fn balance_fixture(marks: &[u32]) -> BalanceFixture {
    let mut show = Show::new("Balance");
    let singing = show.add_criteria(Criteria::new("Singing", 100).primary());
    let group = show.add_cast_group(CastGroup::new("Ensemble").alternating());
    let casts = [
        show.add_alternative_cast(AlternativeCast::new("Red")),
        show.add_alternative_cast(AlternativeCast::new("Blue")),
    ];
    let applicants = marks
        .iter()
        .enumerate()
        .map(|(i, &mark)| {
            let mut applicant = Applicant::new(format!("Singer{i}"), "").with_mark(singing, mark);
            applicant.cast_group = Some(group);
            show.add_applicant(applicant)
        })
        .collect();
    BalanceFixture {
        show,
        applicants,
        group,
        casts,
        singing,
    }
}

/// A role needing two from one non-alternating group.
#[derive(Debug, Clone)]
pub struct LeadFixture {
    pub show: Show,
    /// Suitabilities 0.9, 0.5 and 0.2, in that order.
    pub applicants: Vec<ApplicantId>,
    pub group: CastGroupId,
    pub role: RoleId,
    pub item: NodeId,
}

/// Role "Lead" needs 2 of group "Lead"; its scaled requirement gives the
/// three applicants suitabilities 0.9, 0.5 and 0.2.
pub fn lead_fixture() -> LeadFixture {
    let mut show = Show::new("Lead");
    let acting = show.add_criteria(Criteria::new("Acting", 100));
    let group = show.add_cast_group(CastGroup::new("Lead"));
    let requirement = show.add_requirement(Requirement::new(
        "Actor",
        RequirementKind::AbilityRange {
            criteria: acting,
            minimum: None,
            maximum: None,
            scale_suitability: true,
        },
    ));
    let item = show.add_item(show.root(), "Scene");
    let role = show.add_role(
        &[item],
        Role::new("Lead")
            .with_requirement(requirement)
            .with_count(group, 2),
    );
    // Listed weakest first so ranking cannot rely on input order.
    let applicants = [20, 90, 50]
        .into_iter()
        .enumerate()
        .map(|(i, mark)| {
            let mut applicant = Applicant::new(format!("Actor{i}"), "").with_mark(acting, mark);
            applicant.cast_group = Some(group);
            show.add_applicant(applicant)
        })
        .collect::<Vec<_>>();
    LeadFixture {
        show,
        applicants: vec![applicants[1], applicants[2], applicants[0]],
        group,
        role,
        item,
    }
}

/// A small two-act revue used for end-to-end casting.
#[derive(Debug, Clone)]
pub struct Revue {
    pub show: Show,
    pub applicants: Vec<ApplicantId>,
    pub principals: CastGroupId,
    pub ensemble: CastGroupId,
    pub casts: [AlternativeCastId; 2],
    pub singing: CriteriaId,
    pub dancing: CriteriaId,
    pub acting: CriteriaId,
    pub featured: TagId,
    /// Items in show order: Overture, Duet, Reprise, Finale.
    pub items: [NodeId; 4],
    pub chorus: RoleId,
    pub romeo: RoleId,
    pub juliet: RoleId,
    pub dancers: RoleId,
}

/// Builds the revue.
///
/// - Act 1 (roles may repeat): Overture (Chorus), Duet (Romeo, Juliet)
/// - Act 2 (one role per applicant, no consecutive items): Reprise
///   (Dancers), Finale (Chorus)
/// - Principals: 2 per cast, acting at least 50; Ensemble: 4 per cast
/// - "Featured dancer" tag: dancing at least 40, one per cast of Ensemble
/// - 16 applicants with distinct marks, none yet accepted
pub fn revue() -> Revue {
    let mut show = Show::new("Revue");
    let singing = show.add_criteria(Criteria::new("Singing", 100).primary());
    let dancing = show.add_criteria(Criteria::new("Dancing", 100));
    let acting = show.add_criteria(Criteria::new("Acting", 100).with_weight(2.0));

    let strong_actor = show.add_requirement(Requirement::new(
        "Strong actor",
        RequirementKind::AbilityRange {
            criteria: acting,
            minimum: Some(50),
            maximum: None,
            scale_suitability: true,
        },
    ));
    let male = show.add_requirement(
        Requirement::new(
            "Male",
            RequirementKind::Gender {
                required_value: Gender::Male,
            },
        )
        .with_order(1),
    );
    let female = show.add_requirement(
        Requirement::new(
            "Female",
            RequirementKind::Gender {
                required_value: Gender::Female,
            },
        )
        .with_order(1),
    );
    let dancer = show.add_requirement(
        Requirement::new(
            "Dancer",
            RequirementKind::AbilityRange {
                criteria: dancing,
                minimum: Some(40),
                maximum: None,
                scale_suitability: true,
            },
        )
        .with_order(2),
    );
    let romeo_requirement = show.add_requirement(
        Requirement::new(
            "Leading man",
            RequirementKind::And {
                sub_requirements: vec![male, strong_actor],
                average_suitability: false,
            },
        )
        .with_order(1)
        .primary(),
    );
    let juliet_requirement = show.add_requirement(
        Requirement::new(
            "Leading lady",
            RequirementKind::And {
                sub_requirements: vec![female, strong_actor],
                average_suitability: false,
            },
        )
        .with_order(1)
        .primary(),
    );

    let principals = show.add_cast_group(
        CastGroup::new("Principals")
            .with_required_count(2)
            .alternating()
            .with_requirement(strong_actor),
    );
    let ensemble = show.add_cast_group(
        CastGroup::new("Ensemble")
            .with_required_count(4)
            .alternating(),
    );
    let casts = [
        show.add_alternative_cast(AlternativeCast::new("Red")),
        show.add_alternative_cast(AlternativeCast::new("Blue")),
    ];
    let featured = show.add_tag(
        Tag::new("Featured dancer")
            .with_requirement(dancer)
            .with_count(ensemble, 1),
    );

    let act = show.add_section_type(SectionType::new("Act"));
    let strict_act = show.add_section_type(
        SectionType::new("Strict act")
            .with_multiple_roles(false)
            .with_consecutive_items(false),
    );
    let root = show.root();
    let act_one = show.add_section(root, "Act 1", act);
    let act_two = show.add_section(root, "Act 2", strict_act);
    let overture = show.add_item(act_one, "Overture");
    let duet = show.add_item(act_one, "Duet");
    let reprise = show.add_item(act_two, "Reprise");
    let finale = show.add_item(act_two, "Finale");

    let chorus = show.add_role(
        &[overture, finale],
        Role::new("Chorus").with_count(ensemble, 2),
    );
    let romeo = show.add_role(
        &[duet],
        Role::new("Romeo")
            .with_requirement(romeo_requirement)
            .with_count(principals, 1),
    );
    let juliet = show.add_role(
        &[duet],
        Role::new("Juliet")
            .with_requirement(juliet_requirement)
            .with_count(principals, 1),
    );
    let dancers = show.add_role(
        &[reprise],
        Role::new("Dancers")
            .with_requirement(dancer)
            .with_count(ensemble, 2),
    );

    // (first name, gender, singing, dancing, acting)
    let people = [
        ("Ada", Gender::Female, 95, 60, 90),
        ("Ben", Gender::Male, 85, 55, 85),
        ("Cal", Gender::Male, 80, 70, 75),
        ("Dee", Gender::Female, 75, 65, 70),
        ("Eve", Gender::Female, 70, 80, 40),
        ("Finn", Gender::Male, 68, 85, 35),
        ("Gia", Gender::Female, 66, 75, 30),
        ("Hal", Gender::Male, 64, 45, 45),
        ("Ivy", Gender::Female, 62, 50, 25),
        ("Jon", Gender::Male, 60, 90, 20),
        ("Kai", Gender::Male, 58, 30, 15),
        ("Lux", Gender::Female, 56, 35, 10),
        ("Max", Gender::Male, 40, 20, 10),
        ("Noa", Gender::Female, 35, 25, 5),
        ("Oli", Gender::Male, 30, 15, 5),
        ("Pia", Gender::Female, 25, 10, 0),
    ];
    let applicants = people
        .into_iter()
        .map(|(name, gender, sing, dance, act)| {
            show.add_applicant(
                Applicant::new(name, "")
                    .with_gender(gender)
                    .with_mark(singing, sing)
                    .with_mark(dancing, dance)
                    .with_mark(acting, act),
            )
        })
        .collect();

    Revue {
        show,
        applicants,
        principals,
        ensemble,
        casts,
        singing,
        dancing,
        acting,
        featured,
        items: [overture, duet, reprise, finale],
        chorus,
        romeo,
        juliet,
        dancers,
    }
}
