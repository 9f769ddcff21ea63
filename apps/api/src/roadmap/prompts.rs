/// Prompt for a six-month learning roadmap.
/// Placeholder: {career_goal}
pub const ROADMAP_PROMPT_TEMPLATE: &str = r#"Create a detailed 6-month learning roadmap for becoming a "{career_goal}".
Return strictly JSON format:
{
    "career": "{career_goal}",
    "description": "Short description",
    "milestones": [
        { "week": 1, "title": "Topic", "details": "What to learn", "resource": "Link description" }
    ]
}
Include roughly 12 milestones, ordered by week."#;
