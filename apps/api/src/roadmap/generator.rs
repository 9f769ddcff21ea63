//! Roadmap generation: one LLM call, or a canned milestone list picked by the
//! wording of the career goal.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;
use crate::roadmap::prompts::ROADMAP_PROMPT_TEMPLATE;

static TECH_GOAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)developer|engineer|scientist|data|net").expect("valid regex"));
static DESIGN_GOAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)design|art|ui|ux").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub week: u32,
    pub title: String,
    pub details: String,
    #[serde(default)]
    pub resource: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedRoadmap {
    pub career: String,
    #[serde(default)]
    pub description: String,
    pub milestones: Vec<Milestone>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoadmapTrack {
    Tech,
    Design,
    Generic,
}

impl RoadmapTrack {
    /// Tech wins over design when a goal matches both.
    pub fn for_goal(goal: &str) -> Self {
        if TECH_GOAL.is_match(goal) {
            RoadmapTrack::Tech
        } else if DESIGN_GOAL.is_match(goal) {
            RoadmapTrack::Design
        } else {
            RoadmapTrack::Generic
        }
    }
}

/// Generates a roadmap with the LLM when one is configured, otherwise (or on
/// any failure or empty answer) from the canned tracks.
pub async fn generate_roadmap(llm: Option<&LlmClient>, career_goal: &str) -> GeneratedRoadmap {
    if let Some(llm) = llm {
        info!("Generating AI roadmap for: {career_goal}");
        let prompt = ROADMAP_PROMPT_TEMPLATE.replace("{career_goal}", career_goal);
        match llm
            .call_json::<GeneratedRoadmap>(&prompt, JSON_ONLY_SYSTEM)
            .await
        {
            Ok(roadmap) if !roadmap.milestones.is_empty() => return roadmap,
            Ok(_) => warn!("LLM roadmap had no milestones, falling back to template"),
            Err(e) => warn!("LLM roadmap failed, falling back to template: {e}"),
        }
    } else {
        info!("Generating template roadmap for: {career_goal} (no LLM key)");
    }
    fallback_roadmap(career_goal)
}

pub fn fallback_roadmap(career_goal: &str) -> GeneratedRoadmap {
    let milestones = match RoadmapTrack::for_goal(career_goal) {
        RoadmapTrack::Tech => tech_milestones(),
        RoadmapTrack::Design => design_milestones(),
        RoadmapTrack::Generic => generic_milestones(career_goal),
    };
    GeneratedRoadmap {
        career: career_goal.to_string(),
        description: format!(
            "A tailored step-by-step guide to becoming a {career_goal} in 6 months."
        ),
        milestones,
    }
}

fn milestone(week: u32, title: &str, details: &str, resource: &str) -> Milestone {
    Milestone {
        week,
        title: title.to_string(),
        details: details.to_string(),
        resource: resource.to_string(),
    }
}

fn tech_milestones() -> Vec<Milestone> {
    vec![
        milestone(1, "Computer Science Basics", "Learn about binary, memory, and how the internet works.", "CS50 on YouTube"),
        milestone(2, "Programming Fundamentals", "Variables, loops, functions, and data structures.", "FreeCodeCamp"),
        milestone(4, "Version Control (Git)", "Learn to track code and collaborate on GitHub.", "Git Documentation"),
        milestone(6, "Databases & SQL", "Understanding relational databases and writing queries.", "PostgreSQL Tutorial"),
        milestone(8, "Frameworks & Libraries", "Deep dive into React, Node.js, or Python libraries.", "Official Docs"),
        milestone(12, "Build a Portfolio Project", "Create a full-stack application to showcase your skills.", "Project Ideas"),
        milestone(16, "System Design Basics", "Scalability, Load Balancing, and Architecture.", "System Design Primer"),
        milestone(24, "Interview Preparation", "LeetCode, behavioral questions, and mock interviews.", "Cracking the Coding Interview"),
    ]
}

fn design_milestones() -> Vec<Milestone> {
    vec![
        milestone(1, "Design Principles", "Color theory, typography, and layout.", "Material Design Guidelines"),
        milestone(3, "Mastering Figma", "Auto-layout, components, and prototyping.", "Figma YouTube Channel"),
        milestone(6, "User Research", "User personas, journey maps, and empathy mapping.", "NNGroup Articles"),
        milestone(10, "Wireframing & Prototyping", "Low-fidelity to high-fidelity designs.", "Balsamiq / Figma"),
        milestone(15, "Design Systems", "Creating and maintaining a consistent design language.", "Atomic Design"),
        milestone(20, "Portfolio Construction", "Curating case studies and presenting work.", "Behance / Dribbble"),
    ]
}

fn generic_milestones(career_goal: &str) -> Vec<Milestone> {
    vec![
        milestone(1, "Industry Overview", &format!("Understand the landscape of {career_goal}."), "Industry Reports"),
        milestone(4, "Core Skills Development", "Learn the fundamental tools and terminologies.", "Online Courses"),
        milestone(8, "Networking", "Connect with professionals on LinkedIn.", "LinkedIn Guide"),
        milestone(12, "Certification", "Obtain relevant certifications for credibility.", "Cert Provider"),
        milestone(16, "Practical Experience", "Internships or volunteer projects.", "Job Boards"),
        milestone(24, "Job Application", "Resume tailoring and interview prep.", "Career Services"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engineer_goal_selects_tech_track() {
        assert_eq!(RoadmapTrack::for_goal("Backend Engineer"), RoadmapTrack::Tech);
        let roadmap = fallback_roadmap("Backend Engineer");
        assert_eq!(roadmap.milestones.len(), 8);
        assert_eq!(roadmap.milestones[0].title, "Computer Science Basics");
    }

    #[test]
    fn test_designer_goal_selects_design_track() {
        assert_eq!(RoadmapTrack::for_goal("Product Designer"), RoadmapTrack::Design);
        let roadmap = fallback_roadmap("Product Designer");
        assert_eq!(roadmap.milestones.len(), 6);
        assert_eq!(roadmap.milestones[1].title, "Mastering Figma");
    }

    #[test]
    fn test_other_goal_selects_generic_track() {
        assert_eq!(RoadmapTrack::for_goal("Chef"), RoadmapTrack::Generic);
        let roadmap = fallback_roadmap("Chef");
        assert_eq!(roadmap.milestones[0].details, "Understand the landscape of Chef.");
        assert_eq!(roadmap.milestones.last().unwrap().week, 24);
    }

    #[test]
    fn test_track_match_is_case_insensitive() {
        assert_eq!(RoadmapTrack::for_goal("DATA ANALYST"), RoadmapTrack::Tech);
        assert_eq!(RoadmapTrack::for_goal("ux researcher"), RoadmapTrack::Design);
    }

    #[test]
    fn test_tech_wins_when_goal_matches_both() {
        assert_eq!(RoadmapTrack::for_goal("Design Engineer"), RoadmapTrack::Tech);
    }

    #[test]
    fn test_fallback_description_names_goal() {
        assert_eq!(
            fallback_roadmap("Nurse").description,
            "A tailored step-by-step guide to becoming a Nurse in 6 months."
        );
    }

    #[test]
    fn test_llm_roadmap_shape_parses() {
        let roadmap: GeneratedRoadmap = serde_json::from_str(
            r#"{"career":"Data Engineer","description":"d",
                "milestones":[{"week":1,"title":"SQL","details":"Joins"}]}"#,
        )
        .unwrap();
        assert_eq!(roadmap.milestones[0].resource, "");
    }

    #[tokio::test]
    async fn test_generate_without_llm_uses_template() {
        let roadmap = generate_roadmap(None, "Software Developer").await;
        assert_eq!(roadmap, fallback_roadmap("Software Developer"));
    }
}
