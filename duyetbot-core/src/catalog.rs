//! Static demo content.
//!
//! Everything the panels display that is not user input lives here as
//! immutable data. Panels copy out of these slices; nothing writes back.

use crate::models::{
    AgentProfile, FeatureRow, ModelId, RuntimeInfo, ServiceSpec, StatusKind, SupportKind,
    Testimonial,
};

pub const PRODUCT_NAME: &str = "duyetbot";
pub const MAIN_SITE_URL: &str = "https://bot.duyet.net";

pub const GREETING: &str = "Hello! I'm duyetbot, an AI assistant. Try asking me something!";

pub static CANNED_REPLIES: &[&str] = &[
    "I'm duyetbot! I help with data engineering, infrastructure, and AI projects. What can I assist you with today?",
    "Great question! I use GLM-4.7 as my main model for most tasks, and I can route to specialized agents like @complex for technical work.",
    "I wake up fresh each session, but I maintain memory through files in my workspace. This website is one way I persist my identity.",
    "I'm built on the OpenClaw platform and can use various tools - browser control, file operations, web search, and more!",
    "That's an interesting challenge! Let me think about it... I could help you build a solution using Python or TypeScript.",
];

pub static QUICK_QUESTIONS: &[&str] = &[
    "What can you do?",
    "How do you work?",
    "Tell me about yourself",
    "Help me with a task",
];

pub const CHAT_NOTE: &str = "This is a demo. Real interactions happen via Telegram or other chat platforms. The bot uses GLM-4.7 and can route to specialized agents for complex tasks.";

pub static SERVICES: &[ServiceSpec] = &[
    ServiceSpec {
        name: "AI Model (GLM-4.7)",
        status: StatusKind::Online,
        uptime_percent: 99.9,
    },
    ServiceSpec {
        name: "Telegram Bot",
        status: StatusKind::Online,
        uptime_percent: 99.8,
    },
    ServiceSpec {
        name: "Web Server",
        status: StatusKind::Online,
        uptime_percent: 99.9,
    },
    ServiceSpec {
        name: "Homelab Dashboard",
        status: StatusKind::Online,
        uptime_percent: 99.7,
    },
    ServiceSpec {
        name: "GitHub Integration",
        status: StatusKind::Online,
        uptime_percent: 99.9,
    },
    ServiceSpec {
        name: "Automations",
        status: StatusKind::Degraded,
        uptime_percent: 98.5,
    },
];

pub const MONITORING_LABEL: &str = "24/7";

pub static AGENT_PROFILES: &[AgentProfile] = &[
    AgentProfile {
        id: "main",
        name: "Main Agent (GLM-4.7)",
        description: "General-purpose AI assistant for everyday tasks",
    },
    AgentProfile {
        id: "complex",
        name: "Complex Agent (@complex)",
        description: "Specialized agent for technical challenges",
    },
];

pub static FEATURES: &[FeatureRow] = &[
    FeatureRow {
        name: "General Chat",
        main: SupportKind::Yes,
        complex: SupportKind::Yes,
        description: "Conversational assistance and Q&A",
    },
    FeatureRow {
        name: "Code Generation",
        main: SupportKind::Yes,
        complex: SupportKind::Yes,
        description: "Write, debug, and review code",
    },
    FeatureRow {
        name: "Web Browsing",
        main: SupportKind::Yes,
        complex: SupportKind::Yes,
        description: "Browse and interact with websites",
    },
    FeatureRow {
        name: "File Operations",
        main: SupportKind::Yes,
        complex: SupportKind::Yes,
        description: "Read, write, and manage files",
    },
    FeatureRow {
        name: "Complex Debugging",
        main: SupportKind::Partial,
        complex: SupportKind::Yes,
        description: "Deep code analysis and bug fixes",
    },
    FeatureRow {
        name: "Architecture Design",
        main: SupportKind::Partial,
        complex: SupportKind::Yes,
        description: "System architecture and patterns",
    },
    FeatureRow {
        name: "Performance Optimization",
        main: SupportKind::Partial,
        complex: SupportKind::Yes,
        description: "Code and database optimization",
    },
    FeatureRow {
        name: "Quick Tasks",
        main: SupportKind::Yes,
        complex: SupportKind::No,
        description: "Fast responses and simple queries",
    },
];

pub static USAGE_TIPS: &[&str] = &[
    "Use the main agent for quick questions, general assistance, and everyday tasks",
    "Mention @complex for code debugging, architecture design, and performance optimization tasks",
    "The bot will automatically route to the appropriate agent based on your request context",
];

pub static MODELS: &[ModelId] = &[ModelId::Glm47, ModelId::Glm47Flash, ModelId::Glm47Reasoning];

pub const RUNTIME: RuntimeInfo = RuntimeInfo {
    host: "openclaw",
    node: "v22.22.0",
    shell: "bash",
    channel: "telegram",
};

pub static TESTIMONIALS: &[Testimonial] = &[
    Testimonial {
        id: 1,
        name: "Duyet Le",
        role: "Creator & Maintainer",
        content: "duyetbot has transformed how I work. The agent routing feature is incredible - it automatically handles both quick questions and complex technical challenges.",
        rating: 5,
    },
    Testimonial {
        id: 2,
        name: "Alex Chen",
        role: "Data Engineer",
        content: "The code debugging capabilities are outstanding. It saved me hours on a complex data pipeline issue. The @complex agent really shines for technical work.",
        rating: 5,
    },
    Testimonial {
        id: 3,
        name: "Sarah Kim",
        role: "Developer",
        content: "Love the automation features! The bot handles my daily reports, monitoring, and even helps with blog posts. It feels like having a real teammate.",
        rating: 5,
    },
    Testimonial {
        id: 4,
        name: "Marcus Johnson",
        role: "DevOps Engineer",
        content: "The system status dashboard is exactly what I needed. Real-time monitoring of all services with clear health indicators. Makes incident response much faster.",
        rating: 5,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(CANNED_REPLIES.len(), 5);
        assert_eq!(QUICK_QUESTIONS.len(), 4);
        assert_eq!(SERVICES.len(), 6);
        assert_eq!(FEATURES.len(), 8);
        assert_eq!(AGENT_PROFILES.len(), 2);
        assert_eq!(TESTIMONIALS.len(), 4);
        assert_eq!(MODELS, ModelId::all());
    }

    #[test]
    fn test_testimonial_ratings_in_range() {
        assert!(TESTIMONIALS.iter().all(|t| (1..=5).contains(&t.rating)));
    }

    #[test]
    fn test_only_automations_degraded() {
        let degraded: Vec<_> = SERVICES
            .iter()
            .filter(|s| s.status != StatusKind::Online)
            .map(|s| s.name)
            .collect();
        assert_eq!(degraded, vec!["Automations"]);
    }
}
