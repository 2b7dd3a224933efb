//! Static dataset shown when GitHub cannot be reached

use crate::types::{LanguageShare, Repository};
use chrono::{DateTime, Utc};

fn at(timestamp: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_default()
}

fn shares(entries: &[(&str, u8)]) -> Vec<LanguageShare> {
    entries.iter().map(|&(name, pct)| LanguageShare::new(name, pct)).collect()
}

fn tags(topics: &[&str]) -> Vec<String> {
    topics.iter().map(ToString::to_string).collect()
}

/// The three demo repositories
pub fn fallback_repositories() -> Vec<Repository> {
    vec![
        Repository {
            id: 1,
            name: "portfolio-website".to_string(),
            full_name: "usuario/portfolio-website".to_string(),
            description: Some("Mi portfolio personal construido con Next.js y Framer Motion".to_string()),
            html_url: "https://github.com/usuario/portfolio-website".to_string(),
            homepage: Some("https://miportfolio.com".to_string()),
            language: Some("TypeScript".to_string()),
            languages: shares(&[("TypeScript", 65), ("CSS", 20), ("JavaScript", 10), ("HTML", 5)]),
            stargazers_count: 42,
            forks_count: 8,
            watchers_count: 42,
            size: 1024,
            created_at: at("2023-01-15T10:00:00Z"),
            updated_at: at("2024-01-15T15:30:00Z"),
            pushed_at: Some(at("2024-01-15T15:30:00Z")),
            topics: tags(&["nextjs", "framer-motion", "portfolio", "typescript"]),
            visibility: "public".to_string(),
        },
        Repository {
            id: 2,
            name: "ecommerce-platform".to_string(),
            full_name: "usuario/ecommerce-platform".to_string(),
            description: Some("Plataforma de e-commerce completa con React, Node.js y Stripe".to_string()),
            html_url: "https://github.com/usuario/ecommerce-platform".to_string(),
            homepage: Some("https://demo-ecommerce.com".to_string()),
            language: Some("JavaScript".to_string()),
            languages: shares(&[
                ("JavaScript", 45),
                ("TypeScript", 30),
                ("CSS", 15),
                ("HTML", 8),
                ("Shell", 2),
            ]),
            stargazers_count: 128,
            forks_count: 24,
            watchers_count: 128,
            size: 2048,
            created_at: at("2023-03-20T14:00:00Z"),
            updated_at: at("2024-01-10T09:15:00Z"),
            pushed_at: Some(at("2024-01-10T09:15:00Z")),
            topics: tags(&["react", "nodejs", "stripe", "ecommerce"]),
            visibility: "public".to_string(),
        },
        Repository {
            id: 3,
            name: "task-management-app".to_string(),
            full_name: "usuario/task-management-app".to_string(),
            description: Some(
                "Aplicación de gestión de tareas con drag & drop y colaboración en tiempo real".to_string(),
            ),
            html_url: "https://github.com/usuario/task-management-app".to_string(),
            homepage: None,
            language: Some("TypeScript".to_string()),
            languages: shares(&[("TypeScript", 70), ("SCSS", 18), ("JavaScript", 8), ("HTML", 4)]),
            stargazers_count: 67,
            forks_count: 12,
            watchers_count: 67,
            size: 1536,
            created_at: at("2023-06-10T11:30:00Z"),
            updated_at: at("2024-01-05T16:45:00Z"),
            pushed_at: Some(at("2024-01-05T16:45:00Z")),
            topics: tags(&["react", "typescript", "dnd", "realtime"]),
            visibility: "public".to_string(),
        },
    ]
}
