//! Technology Extractor: substring scan against a canonical vocabulary.

/// Canonical technology names. Output order follows this list.
pub const DEFAULT_VOCABULARY: &[&str] = &[
    // Languages
    "JavaScript",
    "TypeScript",
    "Python",
    "Java",
    "Rust",
    "Go",
    "C#",
    "C++",
    "PHP",
    "Swift",
    "Kotlin",
    // Frameworks
    "React",
    "Next.js",
    "Vue",
    "Angular",
    "Node.js",
    "Express",
    "Django",
    "Flask",
    "Spring",
    "Tailwind",
    // Data
    "PostgreSQL",
    "MySQL",
    "MongoDB",
    "Redis",
    "Elasticsearch",
    "DynamoDB",
    "GraphQL",
    // Infrastructure
    "AWS",
    "Azure",
    "GCP",
    "Lambda",
    "Docker",
    "Kubernetes",
    "Terraform",
    "Jenkins",
    "Linux",
    "Kafka",
    // Vendor tools
    "Salesforce",
    "PowerShell",
    "Power Automate",
    "Zapier",
    "OpenAI",
];

/// Returns the vocabulary entries whose lowercase form occurs anywhere in the
/// lowercased text. Canonical spelling, vocabulary order, no duplicates.
///
/// This is a plain substring scan: `"Go"` matches inside `"Google"`.
pub fn extract_technologies<S: AsRef<str>>(text: &str, vocabulary: &[S]) -> Vec<String> {
    let haystack = text.to_lowercase();
    let mut found: Vec<String> = Vec::new();
    for name in vocabulary {
        let name = name.as_ref();
        if name.is_empty() || !haystack.contains(&name.to_lowercase()) {
            continue;
        }
        if !found.iter().any(|f| f.eq_ignore_ascii_case(name)) {
            found.push(name.to_string());
        }
    }
    found
}
