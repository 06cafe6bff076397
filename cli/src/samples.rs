//! Built-in decks used when no items file is given.

use swipedeck_engine::{Candidate, Job, Modality};

fn job(
    id: u64,
    title: &str,
    company: &str,
    location: &str,
    modality: Modality,
    salary: Option<&str>,
    description: &str,
) -> Job {
    Job {
        id,
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        modality,
        category: None,
        salary: salary.map(str::to_string),
        currency: salary.map(|_| "EUR".to_string()),
        description: description.to_string(),
        is_external: false,
        external_url: None,
    }
}

#[must_use]
pub fn jobs() -> Vec<Job> {
    let mut external = job(
        104,
        "Data Analyst",
        "Northwind",
        "Porto",
        Modality::Onsite,
        None,
        "Own the weekly reporting pipeline and help product teams read their numbers.",
    );
    external.is_external = true;
    external.external_url = Some("https://careers.example.com/northwind/data-analyst".to_string());
    external.category = Some("Data".to_string());

    vec![
        job(
            101,
            "Backend Engineer",
            "Acme Logistics",
            "Lisbon",
            Modality::Hybrid,
            Some("55k - 70k"),
            "Design and run the services that route thousands of parcels a day.\n\
             Rust or Go experience is a plus.",
        ),
        job(
            102,
            "Product Designer",
            "Brightside",
            "Madrid",
            Modality::Remote,
            Some("48k - 60k"),
            "Shape the mobile experience end to end, from research to polished screens.",
        ),
        job(
            103,
            "Site Reliability Engineer",
            "Cloudberry",
            "Barcelona",
            Modality::Onsite,
            Some("60k - 80k"),
            "Keep a multi-region platform healthy and make on-call boring.",
        ),
        external,
        job(
            105,
            "Mobile Developer",
            "Tidepool",
            "Valencia",
            Modality::Hybrid,
            None,
            "Ship features to a React Native app used by half a million people.",
        ),
    ]
}

fn candidate(
    id: &str,
    name: &str,
    title: &str,
    location: &str,
    years: u32,
    skills: &[&str],
    bio: &str,
) -> Candidate {
    Candidate {
        id: id.to_string(),
        name: name.to_string(),
        title: title.to_string(),
        location: location.to_string(),
        bio: bio.to_string(),
        skills: skills.iter().map(|s| (*s).to_string()).collect(),
        experience_years: Some(years),
        unlocked: false,
        email: None,
    }
}

#[must_use]
pub fn candidates() -> Vec<Candidate> {
    let mut unlocked = candidate(
        "cand-3",
        "Lucía Romero",
        "Data Engineer",
        "Seville",
        3,
        &["Python", "Airflow", "SQL"],
        "Builds tidy batch pipelines and cares about data contracts.",
    );
    unlocked.unlocked = true;
    unlocked.email = Some("lucia.romero@example.com".to_string());

    vec![
        candidate(
            "cand-1",
            "Marta Silva",
            "Senior Backend Engineer",
            "Lisbon",
            8,
            &["Rust", "PostgreSQL", "Kubernetes"],
            "Led the rewrite of a payments ledger. Enjoys mentoring and code review.",
        ),
        candidate(
            "cand-2",
            "Javier Ortega",
            "Frontend Developer",
            "Madrid",
            4,
            &["TypeScript", "React", "Accessibility"],
            "Turns design systems into fast, accessible interfaces.",
        ),
        unlocked,
        candidate(
            "cand-4",
            "Inês Costa",
            "Product Designer",
            "Porto",
            6,
            &["Figma", "User research"],
            "Runs discovery sprints and prototypes quickly.",
        ),
    ]
}
