//! Static tables describing where retrieval-augmented generation fits

/// A real-world setting where RAG helps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scenario {
    pub name: &'static str,
    pub problem: &'static str,
    pub solution: &'static str,
    pub benefit: &'static str,
}

/// A kind of question RAG is suited to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UseCase {
    pub name: &'static str,
    pub description: &'static str,
}

const SCENARIOS: &[Scenario] = &[
    Scenario {
        name: "Customer Support",
        problem: "Customers ask about product features, policies, and troubleshooting",
        solution: "RAG with product documentation and FAQ database",
        benefit: "Accurate, up-to-date answers without training new models",
    },
    Scenario {
        name: "Legal Research",
        problem: "Lawyers need to search through case law and regulations",
        solution: "RAG with legal document database",
        benefit: "Finds relevant precedents and citations quickly",
    },
    Scenario {
        name: "Medical Diagnosis",
        problem: "Doctors need to reference medical literature and guidelines",
        solution: "RAG with medical journals and clinical guidelines",
        benefit: "Provides evidence-based recommendations",
    },
    Scenario {
        name: "Academic Research",
        problem: "Researchers need to find relevant papers and citations",
        solution: "RAG with academic paper database",
        benefit: "Discovers related research and current state of knowledge",
    },
    Scenario {
        name: "Enterprise Knowledge",
        problem: "Employees need to find company policies and procedures",
        solution: "RAG with internal documentation",
        benefit: "Ensures compliance and consistent information",
    },
];

const USE_CASES: &[UseCase] = &[
    UseCase {
        name: "Specific Knowledge",
        description: "Questions requiring domain-specific information",
    },
    UseCase {
        name: "Real-time Data",
        description: "Information that changes frequently",
    },
    UseCase {
        name: "Document Q&A",
        description: "Questions about specific documents or policies",
    },
    UseCase {
        name: "Factual Accuracy",
        description: "When you need verifiable, sourced information",
    },
    UseCase {
        name: "Large Knowledge Bases",
        description: "When information is too large for LLM context",
    },
    UseCase {
        name: "Compliance",
        description: "When answers must be based on official documentation",
    },
    UseCase {
        name: "Multi-source Information",
        description: "When information comes from multiple sources",
    },
];

pub fn real_world_scenarios() -> &'static [Scenario] {
    SCENARIOS
}

pub fn rag_use_cases() -> &'static [UseCase] {
    USE_CASES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenarios() {
        let scenarios = real_world_scenarios();
        assert_eq!(scenarios.len(), 5);
        assert_eq!(scenarios[0].name, "Customer Support");
        assert_eq!(scenarios[4].name, "Enterprise Knowledge");
        assert!(scenarios
            .iter()
            .all(|s| !s.problem.is_empty() && !s.solution.is_empty() && !s.benefit.is_empty()));
    }

    #[test]
    fn test_use_cases() {
        let use_cases = rag_use_cases();
        assert_eq!(use_cases.len(), 7);
        assert_eq!(use_cases[2].name, "Document Q&A");
        assert_eq!(use_cases[6].name, "Multi-source Information");
    }
}
