//! Intent classification
//!
//! Classification is table driven: phrase lists decide whether a request is
//! a question or too vague to act on, and one [`SkillRule`] per skill decides
//! which specialists it needs. The tables are plain data so they can be
//! swapped or extended without touching the control flow.

use std::collections::BTreeSet;

use hirewire_types::SkillTag;

/// Keyword rule for one skill
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillRule {
    pub skill: SkillTag,
    /// Terms that on their own route to the skill
    pub keywords: Vec<String>,
    /// Weaker terms that route to the skill only when a conjunction cue links
    /// them to another skill's strong match ("an NFT contract with a mint page")
    pub companion_keywords: Vec<String>,
}

impl SkillRule {
    pub fn new(skill: SkillTag, keywords: &[&str], companion_keywords: &[&str]) -> Self {
        Self {
            skill,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            companion_keywords: companion_keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    fn matches_strongly(&self, text: &str) -> bool {
        self.keywords.iter().any(|k| contains_term(text, k))
    }

    fn matches_companion(&self, text: &str) -> bool {
        self.companion_keywords.iter().any(|k| contains_term(text, k))
    }
}

/// Outcome of classifying one request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub informational: bool,
    pub vague: bool,
    /// Skills in hire order; empty for informational or vague input
    pub skills: BTreeSet<SkillTag>,
}

impl Classification {
    /// Actionable but no skill matched
    pub fn is_unroutable(&self) -> bool {
        !self.informational && !self.vague && self.skills.is_empty()
    }
}

/// Phrase and keyword tables
#[derive(Debug, Clone)]
pub struct ClassifierRules {
    pub question_phrases: Vec<String>,
    /// Informational only when the input ends with '?' or is shorter than this
    pub question_max_len: usize,
    /// Substrings that make even a very short request specific enough
    pub specific_keywords: Vec<String>,
    pub short_input_len: usize,
    pub generic_phrases: Vec<String>,
    pub generic_input_len: usize,
    /// Words or symbols that join two pieces of work
    pub conjunction_cues: Vec<String>,
    pub skills: Vec<SkillRule>,
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self {
            question_phrases: strings(&[
                "what is",
                "what are",
                "what can you",
                "what do you",
                "how does",
                "how do",
                "tell me about",
                "explain",
                "capabilities",
                "who are you",
                "what services",
            ]),
            question_max_len: 50,
            specific_keywords: strings(&[
                "erc", "nft", "contract", "audit", "token", "solidity", "react", "defi", "dapp",
                "security", "frontend", "dashboard",
            ]),
            short_input_len: 20,
            generic_phrases: strings(&["help me", "i need", "show me", "can you", "i want"]),
            generic_input_len: 30,
            conjunction_cues: strings(&["and", "+", "with", "&"]),
            skills: vec![
                SkillRule::new(
                    SkillTag::Solidity,
                    &[
                        "solidity",
                        "smart contract",
                        "contract",
                        "erc-20",
                        "erc20",
                        "erc-721",
                        "erc721",
                        "erc-1155",
                        "erc1155",
                        "token",
                        "nft",
                        "defi",
                        "dapp",
                        "blockchain",
                        "staking",
                        "dao",
                        "airdrop",
                    ],
                    &["on-chain", "onchain", "mint", "minting", "escrow"],
                ),
                SkillRule::new(
                    SkillTag::Frontend,
                    &[
                        "react",
                        "next.js",
                        "nextjs",
                        "ui",
                        "component",
                        "tailwind",
                        "web3 integration",
                        "frontend",
                        "front-end",
                        "dashboard",
                        "landing page",
                        "website",
                        "user interface",
                    ],
                    &["web app", "webapp", "web page", "webpage", "interface", "screen", "layout", "mockup"],
                ),
                SkillRule::new(
                    SkillTag::Security,
                    &[
                        "security",
                        "audit",
                        "security audit",
                        "code audit",
                        "vulnerability",
                        "vulnerabilities",
                        "vulnerability assessment",
                        "penetration test",
                        "pen test",
                        "exploit",
                    ],
                    &[],
                ),
            ],
        }
    }
}

/// Maps free text to an intent and a set of skill tags
#[derive(Debug, Clone, Default)]
pub struct IntentClassifier {
    rules: ClassifierRules,
}

impl IntentClassifier {
    pub fn new(rules: ClassifierRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ClassifierRules {
        &self.rules
    }

    pub fn classify(&self, input: &str) -> Classification {
        let text = input.trim().to_lowercase();

        if self.is_informational(&text) {
            return Classification {
                informational: true,
                ..Classification::default()
            };
        }

        if self.is_vague(&text) {
            return Classification {
                vague: true,
                ..Classification::default()
            };
        }

        Classification {
            skills: self.extract_skills(&text),
            ..Classification::default()
        }
    }

    /// Question phrase present, and the input reads as a question or is short
    pub fn is_informational(&self, text: &str) -> bool {
        let asks = self.rules.question_phrases.iter().any(|p| text.contains(p.as_str()));
        asks && (text.ends_with('?') || text.chars().count() < self.rules.question_max_len)
    }

    pub fn is_vague(&self, text: &str) -> bool {
        let len = text.chars().count();

        let short_and_unspecific = len < self.rules.short_input_len
            && !self
                .rules
                .specific_keywords
                .iter()
                .any(|k| text.contains(k.as_str()));

        let generic = len < self.rules.generic_input_len
            && self.rules.generic_phrases.iter().any(|p| text.contains(p.as_str()));

        short_and_unspecific || generic
    }

    /// Skills whose strong keywords match, plus skills joined by a
    /// conjunction cue through a companion keyword
    pub fn extract_skills(&self, text: &str) -> BTreeSet<SkillTag> {
        let mut skills: BTreeSet<SkillTag> = self
            .rules
            .skills
            .iter()
            .filter(|rule| rule.matches_strongly(text))
            .map(|rule| rule.skill.clone())
            .collect();

        let linked = self.rules.conjunction_cues.iter().any(|c| contains_term(text, c));
        if linked && !skills.is_empty() {
            for rule in &self.rules.skills {
                if !skills.contains(&rule.skill) && rule.matches_companion(text) {
                    skills.insert(rule.skill.clone());
                }
            }
        }

        skills
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Whole-term match that tolerates a plural "s"
///
/// Terms made of symbols only ("+", "&") match anywhere.
pub fn contains_term(text: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    if !term.chars().any(char::is_alphanumeric) {
        return text.contains(term);
    }

    let is_word = |c: char| c.is_alphanumeric();

    text.match_indices(term).any(|(start, matched)| {
        let before_ok = text[..start].chars().next_back().map_or(true, |c| !is_word(c));

        let mut rest = text[start + matched.len()..].chars();
        let after_ok = match rest.next() {
            None => true,
            Some('s') => rest.next().map_or(true, |c| !is_word(c)),
            Some(c) => !is_word(c),
        };

        before_ok && after_ok
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(input: &str) -> Vec<SkillTag> {
        IntentClassifier::default()
            .classify(input)
            .skills
            .into_iter()
            .collect()
    }

    #[test]
    fn test_term_boundaries() {
        assert!(contains_term("build a ui for it", "ui"));
        assert!(!contains_term("build it", "ui"));
        assert!(contains_term("two smart contracts", "smart contract"));
        assert!(!contains_term("contractor work", "contract"));
        assert!(contains_term("react+solidity", "+"));
        assert!(contains_term("an erc-20 token.", "erc-20"));
    }

    #[test]
    fn test_informational() {
        let classifier = IntentClassifier::default();
        assert!(classifier.classify("what can you do?").informational);
        assert!(classifier.classify("Tell me about your capabilities").informational);

        let long = "what is the best way to build a staking contract that rewards long term holders";
        assert!(!classifier.classify(long).informational);
    }

    #[test]
    fn test_vague() {
        let classifier = IntentClassifier::default();
        assert!(classifier.classify("help me").vague);
        assert!(classifier.classify("I need something").vague);
        assert!(!classifier.classify("NFT contract").vague);
        assert!(!classifier.classify("Create an ERC-20 token").vague);
    }

    #[test]
    fn test_security_only() {
        assert_eq!(
            skills("Please run a security audit on my codebase"),
            vec![SkillTag::Security]
        );
        assert_eq!(
            skills("Do a penetration test of our staging environment"),
            vec![SkillTag::Security]
        );
    }

    #[test]
    fn test_frontend_and_solidity_combined() {
        assert_eq!(
            skills("Build a React component with a smart contract for an NFT"),
            vec![SkillTag::Solidity, SkillTag::Frontend]
        );
        assert_eq!(
            skills("Write a solidity vault and a tailwind landing page"),
            vec![SkillTag::Solidity, SkillTag::Frontend]
        );
        assert_eq!(
            skills("react+solidity staking app"),
            vec![SkillTag::Solidity, SkillTag::Frontend]
        );
        assert_eq!(
            skills("Launch an NFT collection + a mint screen"),
            vec![SkillTag::Solidity, SkillTag::Frontend]
        );
        assert_eq!(
            skills("Mint button & an ERC-721 contract"),
            vec![SkillTag::Solidity]
        );
        assert_eq!(
            skills("Write an ERC-721 contract & a holder screen"),
            vec![SkillTag::Solidity, SkillTag::Frontend]
        );
    }

    #[test]
    fn test_generic_words_hire_nobody_extra() {
        assert_eq!(
            skills("Build a React dashboard and deploy it to vercel"),
            vec![SkillTag::Frontend]
        );
        assert_eq!(
            skills("Build a landing page with a backend API for my bakery"),
            vec![SkillTag::Frontend]
        );
        assert_eq!(
            skills("Write an ERC-20 token with a fixed supply for my app"),
            vec![SkillTag::Solidity]
        );
    }

    #[test]
    fn test_companion_needs_conjunction() {
        assert_eq!(
            skills("Create an NFT collection with a minting screen for collectors"),
            vec![SkillTag::Solidity, SkillTag::Frontend]
        );
        assert_eq!(
            skills("Create an NFT collection for the launch screen"),
            vec![SkillTag::Solidity]
        );
    }

    #[test]
    fn test_security_is_additive() {
        assert_eq!(
            skills("Write an ERC-20 token contract and audit it for vulnerabilities"),
            vec![SkillTag::Solidity, SkillTag::Security]
        );
    }

    #[test]
    fn test_unroutable() {
        let classification = IntentClassifier::default()
            .classify("Write me a poem about the ocean at sunrise please");
        assert!(classification.is_unroutable());
    }

    #[test]
    fn test_custom_rule_table() {
        let mut rules = ClassifierRules::default();
        rules.skills.push(SkillRule::new(
            SkillTag::Custom("design".to_string()),
            &["logo", "branding"],
            &[],
        ));

        let classification = IntentClassifier::new(rules).classify("Design a logo for my bakery shop");
        assert!(classification
            .skills
            .contains(&SkillTag::Custom("design".to_string())));
    }
}
