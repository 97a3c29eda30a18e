//! Interactive questionnaire
//!
//! Every prompt shows its default in brackets. An empty answer (or end of
//! input) keeps the default, so piping an empty stdin yields the default
//! resume.

use resumetex_core::resume::{Education, Project, Resume, Skills};
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};

/// One entry of a repeated section: a title plus its other fields
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Entry {
    pub title: String,
    pub fields: BTreeMap<String, String>,
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask for a single value, falling back to `default`
    pub fn ask(&mut self, label: &str, default: &str) -> io::Result<String> {
        write!(self.output, "{} [{}]: ", label, default)?;
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;

        let answer = line.trim();
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer.to_string())
        }
    }

    /// Ask for entries until the title is left empty
    ///
    /// `fields` lists the remaining field names with their defaults, prompted
    /// as `"{section} {Field}"`.
    pub fn ask_entries(&mut self, section: &str, fields: &[(&str, &str)]) -> io::Result<Vec<Entry>> {
        writeln!(
            self.output,
            "\nEnter {} (leave title empty to finish):",
            section
        )?;

        let mut entries = Vec::new();
        loop {
            let title = self.ask(&format!("{} Title", section), "")?;
            if title.is_empty() {
                break;
            }

            let mut entry = Entry {
                title,
                fields: BTreeMap::new(),
            };
            for (field, default) in fields {
                let label = format!("{} {}", section, capitalize(field));
                entry
                    .fields
                    .insert(field.to_string(), self.ask(&label, default)?);
            }
            entries.push(entry);
        }
        Ok(entries)
    }

    /// Ask for list items until one is left empty
    pub fn ask_list(&mut self, section: &str) -> io::Result<Vec<String>> {
        writeln!(self.output, "\nEnter {} (leave empty to finish):", section)?;

        let mut items = Vec::new();
        loop {
            let item = self.ask(&format!("{} Item", section), "")?;
            if item.is_empty() {
                break;
            }
            items.push(item);
        }
        Ok(items)
    }

    /// Run the full questionnaire
    pub fn collect_resume(&mut self) -> io::Result<Resume> {
        let d = Resume::default();

        let name = self.ask("Full Name", &d.name)?;
        let address = self.ask("Address", &d.address)?;
        let phone = self.ask("Phone", &d.phone)?;
        let email = self.ask("Email", &d.email)?;
        let linkedin_text = self.ask("LinkedIn display text", &d.linkedin_text)?;
        let linkedin = self.ask("LinkedIn URL", &d.linkedin)?;
        let github_text = self.ask("GitHub display text", &d.github_text)?;
        let github = self.ask("GitHub URL", &d.github)?;

        let education = Education {
            institution: self.ask("Education Institution", &d.education.institution)?,
            degree: self.ask("Degree", &d.education.degree)?,
            location: self.ask("Education Location", &d.education.location)?,
            dates: self.ask("Education Dates", &d.education.dates)?,
        };

        let projects = self
            .ask_entries("Project", &[("description", "")])?
            .into_iter()
            .map(|mut entry| Project {
                description: entry.fields.remove("description").unwrap_or_default(),
                title: entry.title,
            })
            .collect();

        let skills = Skills {
            languages: self.ask("Programming Languages", &d.skills.languages)?,
            tools: self.ask("Developer Tools", &d.skills.tools)?,
            frameworks: self.ask("Frameworks", &d.skills.frameworks)?,
        };

        let achievements = self.ask_list("Achievement")?;

        Ok(Resume {
            name,
            address,
            phone,
            email,
            linkedin_text,
            linkedin,
            github_text,
            github,
            education,
            projects,
            skills,
            achievements,
        })
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
