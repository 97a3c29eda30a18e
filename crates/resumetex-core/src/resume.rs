//! Typed resume input with defaults
//!
//! [`Resume`] is what the questionnaire or a data file produces. It is
//! converted into a [`Record`] exactly once per run, right before escaping.

use crate::error::{Result, ResumetexError};
use crate::value::{Record, Value};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resume {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub linkedin_text: String,
    pub linkedin: String,
    pub github_text: String,
    pub github: String,
    pub education: Education,
    pub projects: Vec<Project>,
    pub skills: Skills,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub location: String,
    pub dates: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    pub languages: String,
    pub tools: String,
    pub frameworks: String,
}

impl Default for Resume {
    fn default() -> Self {
        Self {
            name: "John Doe".to_string(),
            address: "123 Cyber Street, Melbourne".to_string(),
            phone: "+61 400 000 000".to_string(),
            email: "john@example.com".to_string(),
            linkedin_text: "LinkedIn".to_string(),
            linkedin: "https://linkedin.com/in/johndoe".to_string(),
            github_text: "GitHub".to_string(),
            github: "https://github.com/johndoe".to_string(),
            education: Education::default(),
            projects: Vec::new(),
            skills: Skills::default(),
            achievements: Vec::new(),
        }
    }
}

impl Default for Education {
    fn default() -> Self {
        Self {
            institution: "Monash University".to_string(),
            degree: "Bachelor of IT, Major in Cybersecurity".to_string(),
            location: "Clayton, VIC".to_string(),
            dates: "2025–2027".to_string(),
        }
    }
}

impl Default for Skills {
    fn default() -> Self {
        Self {
            languages: "Python, Java, SQL".to_string(),
            tools: "Git, Docker, VS Code, Postman".to_string(),
            frameworks: "Flask, Django, React".to_string(),
        }
    }
}

impl Resume {
    /// Load resume data from a TOML or JSON file
    ///
    /// The format is chosen by extension (`.json` is JSON, anything else is
    /// TOML). Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        debug!(path = %path.display(), is_json, "loading resume data");

        let parsed = if is_json {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        } else {
            toml::from_str(&content).map_err(|e| e.to_string())
        };

        parsed.map_err(|reason| ResumetexError::DataParseError {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Convert into the generic record consumed by the escaper
    ///
    /// Adds `email_url`, a copy of `email` that stays unescaped for `\url{}`.
    pub fn into_record(self) -> Record {
        let projects: Vec<Value> = self
            .projects
            .into_iter()
            .map(|p| {
                Value::from(
                    Record::new()
                        .with("title", p.title)
                        .with("description", p.description),
                )
            })
            .collect();

        Record::new()
            .with("name", self.name)
            .with("address", self.address)
            .with("phone", self.phone)
            .with("email_url", self.email.clone())
            .with("email", self.email)
            .with("linkedin_text", self.linkedin_text)
            .with("linkedin", self.linkedin)
            .with("github_text", self.github_text)
            .with("github", self.github)
            .with(
                "education",
                Record::new()
                    .with("institution", self.education.institution)
                    .with("degree", self.education.degree)
                    .with("location", self.education.location)
                    .with("dates", self.education.dates),
            )
            .with("projects", projects)
            .with(
                "skills",
                Record::new()
                    .with("languages", self.skills.languages)
                    .with("tools", self.skills.tools)
                    .with("frameworks", self.skills.frameworks),
            )
            .with("achievements", self.achievements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resumetex_testkit::temp_dir_in_workspace;

    #[test]
    fn test_defaults() {
        let resume = Resume::default();
        assert_eq!(resume.name, "John Doe");
        assert_eq!(resume.education.dates, "2025–2027");
        assert_eq!(resume.skills.tools, "Git, Docker, VS Code, Postman");
        assert!(resume.projects.is_empty());
        assert!(resume.achievements.is_empty());
    }

    #[test]
    fn test_into_record_shape() {
        let mut resume = Resume::default();
        resume.projects.push(Project {
            title: "Scanner".to_string(),
            description: "Port scanner".to_string(),
        });
        resume.achievements.push("CTF winner".to_string());

        let record = resume.into_record();

        assert_eq!(record.get("email"), record.get("email_url"));
        assert_eq!(
            record.resolve("education.institution"),
            Some(&Value::from("Monash University"))
        );
        assert_eq!(
            record.resolve("skills.frameworks"),
            Some(&Value::from("Flask, Django, React"))
        );

        let projects = record.get("projects").unwrap().as_sequence().unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(
            projects[0].as_mapping().unwrap().get("title"),
            Some(&Value::from("Scanner"))
        );
        assert_eq!(
            record.get("achievements"),
            Some(&Value::from(vec!["CTF winner"]))
        );
    }

    #[test]
    fn test_from_toml_file_fills_defaults() {
        let temp = temp_dir_in_workspace();
        let path = temp.path().join("resume.toml");
        std::fs::write(
            &path,
            r#"
name = "Jane Smith"
achievements = ["Dean's list"]

[education]
institution = "RMIT"

[[projects]]
title = "Vault"
description = "Secret store"
"#,
        )
        .unwrap();

        let resume = Resume::from_file(&path).unwrap();
        assert_eq!(resume.name, "Jane Smith");
        assert_eq!(resume.phone, "+61 400 000 000");
        assert_eq!(resume.education.institution, "RMIT");
        assert_eq!(resume.education.location, "Clayton, VIC");
        assert_eq!(resume.projects.len(), 1);
        assert_eq!(resume.projects[0].title, "Vault");
        assert_eq!(resume.achievements, vec!["Dean's list".to_string()]);
    }

    #[test]
    fn test_from_json_file() {
        let temp = temp_dir_in_workspace();
        let path = temp.path().join("resume.json");
        std::fs::write(&path, r#"{"name": "A & B_Corp", "skills": {"languages": "Rust"}}"#)
            .unwrap();

        let resume = Resume::from_file(&path).unwrap();
        assert_eq!(resume.name, "A & B_Corp");
        assert_eq!(resume.skills.languages, "Rust");
        assert_eq!(resume.skills.tools, "Git, Docker, VS Code, Postman");
    }

    #[test]
    fn test_from_file_parse_error() {
        let temp = temp_dir_in_workspace();
        let path = temp.path().join("broken.toml");
        std::fs::write(&path, "name = ").unwrap();

        match Resume::from_file(&path) {
            Err(ResumetexError::DataParseError { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected DataParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_from_file_missing() {
        let temp = temp_dir_in_workspace();
        let result = Resume::from_file(&temp.path().join("nope.toml"));
        assert!(matches!(result, Err(ResumetexError::IoError(_))));
    }
}
