// Scripted discovery chat text.
// The agent never interprets what the user wrote; replies are chosen per phase.

use crate::chat::phases::ChatPhase;

pub const WELCOME_MESSAGE_ID: &str = "1";

pub const WELCOME_MESSAGE: &str = "\
Hi there! I'm your AI career assistant, and I'm here to help you discover and articulate your unique professional story. 🚀

Instead of filling out boring forms, we'll have a conversation where I'll help you uncover:
• Your key achievements and impact
• Hidden skills you might not realize you have
• Compelling stories that showcase your value
• Quantifiable results from your work

**Let's start simple:** Could you tell me a bit about yourself? You can either:
1. Upload an existing resume, or
2. Just tell me in a few sentences what you do or have done professionally

Don't worry about being perfect - we'll dig deeper together!";

const INTRO_RESPONSES: &[&str] = &[
    "That's a great foundation! I can already see some interesting elements in what you've shared. Let me ask you this: What would you say has been your biggest professional achievement so far? Think about a moment when you felt really proud of what you accomplished.",
    "Interesting background! I'd love to understand more about your impact. Can you tell me about a specific project or task where you made a real difference? What was the situation, and what did you do?",
];

const BACKGROUND_RESPONSES: &[&str] = &[
    "That's impressive! Let's quantify that impact. Do you remember any specific numbers, percentages, or metrics that show the results of your work? For example, did you save time, increase efficiency, reduce costs, or improve user satisfaction?",
    "Excellent! Now I'm curious about the challenges you faced. What obstacles did you overcome, and how did you approach solving them? This will help us showcase your problem-solving abilities.",
];

const EXPERIENCES_RESPONSES: &[&str] = &[
    "That's a compelling story! Let's explore another angle. Tell me about a time when you had to learn something completely new for work. How did you approach it, and what was the outcome?",
    "Great details! Now, thinking about your day-to-day work, what tools, technologies, or methodologies do you use regularly? Also, have you ever mentored others or led a team?",
];

const PROJECTS_RESPONSES: &[&str] = &[
    "Fascinating project! What made you choose that particular approach? And looking back, what would you do differently if you had to start over? This shows your growth mindset.",
    "That sounds impactful! Have you received any recognition for your work? This could be formal awards, positive feedback, promotions, or even just colleagues asking for your help on similar challenges.",
];

const SKILLS_RESPONSES: &[&str] = &[
    "You're clearly skilled in many areas! Let's think about your unique combination of abilities. What would colleagues say is your superpower? What do people come to you for help with?",
    "Perfect! I think we've uncovered some amazing insights about your professional journey. You should feel proud of what you've accomplished! 🌟",
];

/// Canned replies for a phase. `Complete` has no table of its own and falls
/// back to the intro replies.
pub fn responses_for(phase: ChatPhase) -> &'static [&'static str] {
    match phase {
        ChatPhase::Intro | ChatPhase::Complete => INTRO_RESPONSES,
        ChatPhase::Background => BACKGROUND_RESPONSES,
        ChatPhase::Experiences => EXPERIENCES_RESPONSES,
        ChatPhase::Projects => PROJECTS_RESPONSES,
        ChatPhase::Skills => SKILLS_RESPONSES,
    }
}
