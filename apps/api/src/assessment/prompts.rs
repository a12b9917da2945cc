// Fixed texts for the JD assessment conversation and page.
// The seed turns are sent to the model verbatim on every exchange.

/// First part of the seeded user turn.
pub const SEED_HEADER: &str = "Job Description Based Assessment Simulation\n\n";

/// Second part of the seeded user turn. Replace `{jd_text}` before sending.
pub const SEED_JD_TEMPLATE: &str = "**Job Description:**\n{jd_text}\n\n";

/// Canned model turn that opens every assessment.
pub const WELCOME_MESSAGE: &str = "Welcome to the Job Description Based Assessment Simulation!\n\
    Please answer the following questions based on your experience and how it aligns with the provided JD.";

/// Questions shown next to the JD. Not sent to the model.
pub const ASSESSMENT_QUESTIONS: [&str; 5] = [
    "1. How does your experience align with the responsibilities listed in the JD?",
    "2. Which key skills from the JD do you excel at?",
    "3. Can you share a project or experience demonstrating your fit for this role?",
    "4. What challenges do you foresee in this role, and how would you address them?",
    "5. What unique value can you bring to this position?",
];

pub const EMPTY_RESPONSE_WARNING: &str = "Please enter a response before submitting.";

pub const EMPTY_JD_WARNING: &str = "Please enter a Job Description to start the assessment.";
