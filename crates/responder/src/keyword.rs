use crate::reply::{Reply, ReplyAction, Responder};

/// One entry in the canned response table.
///
/// A rule matches when any of its trigger substrings occurs anywhere
/// in the lower-cased input. Rules are tried in declaration order and
/// the first match wins, so specific intents (the control phrases)
/// must come before the broad domain groups.
#[derive(Clone, Copy, Debug)]
pub struct Rule {
    /// Trigger substrings, already lower-cased.
    pub triggers: &'static [&'static str],
    /// The canned response text for this rule.
    pub response: &'static str,
    /// What the caller should do when this rule matches.
    pub action: ReplyAction,
}

impl Rule {
    #[inline]
    fn matches(&self, lowered: &str) -> bool {
        self.triggers.iter().any(|t| lowered.contains(t))
    }

    const fn respond(
        triggers: &'static [&'static str],
        response: &'static str,
    ) -> Self {
        Self {
            triggers,
            response,
            action: ReplyAction::Respond,
        }
    }
}

/// The greeting the transcript is seeded with.
pub const GREETING: &str = "Hello! I'm your ocean data assistant. I can \
    help you explore ARGO float data, explain oceanographic concepts, and \
    answer questions about marine science. What would you like to know?";

/// The reply for inputs no rule matches.
pub const FALLBACK: &str = "That's an interesting question about ocean \
    science! I can help you explore ARGO data, explain oceanographic \
    processes, or discuss marine research topics. Could you be more \
    specific about what aspect you'd like to learn about?";

/// The ordered rule table. Control phrases first, meta-queries second,
/// then the domain groups; [`FALLBACK`] covers everything else.
pub static RULES: &[Rule] = &[
    Rule {
        triggers: &["clear conversation", "clear chat"],
        response: "Conversation cleared.",
        action: ReplyAction::ClearTranscript,
    },
    Rule::respond(
        &["help", "example"],
        "I can describe ARGO floats and their instruments, walk through \
         temperature, salinity, and current patterns, or compare \
         conditions across ocean basins. Try asking something like \
         \"What are ARGO floats?\" or \"Explain salinity variations\".",
    ),
    Rule::respond(
        &["argo", "float"],
        "ARGO floats are autonomous oceanographic instruments that drift \
         with ocean currents and measure temperature, salinity, and \
         pressure profiles. There are over 4,000 active floats worldwide, \
         providing crucial data for climate research and weather \
         prediction.",
    ),
    Rule::respond(
        &["temperature", "thermocline"],
        "Ocean temperature varies significantly with depth and location. \
         Surface temperatures range from -2\u{b0}C in polar regions to \
         30\u{b0}C in tropical areas. The thermocline, typically between \
         200-1000m depth, shows rapid temperature changes. Would you like \
         to see specific temperature data for a particular region?",
    ),
    Rule::respond(
        &["salinity", "psu"],
        "Ocean salinity measures dissolved salt content, typically 34-37 \
         practical salinity units (PSU). It's affected by evaporation, \
         precipitation, ice formation, and freshwater input. Salinity \
         influences water density and ocean circulation patterns.",
    ),
    Rule::respond(
        &["current", "circulation"],
        "Ocean currents are driven by wind, temperature, salinity \
         differences, and Earth's rotation. Major currents like the Gulf \
         Stream transport heat globally, affecting regional climates. The \
         thermohaline circulation acts as a global conveyor belt, mixing \
         deep and surface waters.",
    ),
    Rule::respond(
        &["climate", "weather"],
        "Oceans play a crucial role in climate regulation by storing and \
         transporting heat, absorbing CO2, and influencing weather \
         patterns. Ocean-atmosphere interactions drive phenomena like El \
         Ni\u{f1}o, monsoons, and hurricane formation.",
    ),
    Rule::respond(
        &["depth", "deep", "pressure"],
        "Standard ARGO floats profile from the surface down to 2,000m, \
         cycling roughly every 10 days, while Deep ARGO variants reach \
         4,000-6,000m. Pressure readings convert to depth, so each \
         profile maps how temperature and salinity change through the \
         water column.",
    ),
    Rule::respond(
        &["pacific", "atlantic", "indian", "arctic", "southern ocean"],
        "Each ocean basin has its own character: the Pacific carries the \
         largest float coverage, the Atlantic drives the overturning \
         circulation, and the Indian Ocean shapes monsoon dynamics. Name \
         a basin and a parameter and I can point you at the right data.",
    ),
    Rule::respond(
        &["acidification", "acidic"],
        "Ocean acidification happens as seawater absorbs CO2 from the \
         atmosphere, forming carbonic acid and lowering pH. Surface pH \
         has dropped by about 0.1 units since pre-industrial times, which \
         stresses shell-forming organisms and coral reefs.",
    ),
    Rule::respond(
        &["accurate", "accuracy", "calibration"],
        "ARGO sensors are remarkably precise: temperature to about \
         0.002\u{b0}C and salinity to about 0.01 PSU after calibration. \
         Every profile passes automated quality control before \
         distribution, and sensor drift is corrected against shipboard \
         reference data.",
    ),
];

/// Selects the first matching rule for the input, if any.
///
/// Matching is plain substring containment over the lower-cased input;
/// no tokenization, no regex. `None` means the caller should use
/// [`FALLBACK`].
pub fn match_rule(input: &str) -> Option<&'static Rule> {
    let lowered = input.to_lowercase();
    RULES.iter().find(|rule| rule.matches(&lowered))
}

/// The canned keyword selector.
///
/// A pure function over [`RULES`] dressed as a [`Responder`]: no
/// internal state, total over all inputs, first match wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeywordResponder;

impl Responder for KeywordResponder {
    fn respond(&self, input: &str) -> Reply {
        match match_rule(input) {
            Some(rule) => Reply {
                text: rule.response.to_owned(),
                action: rule.action,
            },
            None => Reply::respond(FALLBACK),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn respond(input: &str) -> Reply {
        KeywordResponder.respond(input)
    }

    #[test]
    fn test_floats_any_case_any_position() {
        for input in ["ARGO Floats", "what are argo floats?", "my FLOAT"] {
            let reply = respond(input);
            assert!(reply.text.contains("autonomous oceanographic"), "{input}");
            assert_eq!(reply.action, ReplyAction::Respond);
        }
    }

    #[test]
    fn test_control_phrases_preempt_domain_groups() {
        let reply = respond("clear chat about argo floats");
        assert_eq!(reply.action, ReplyAction::ClearTranscript);
        let reply = respond("please CLEAR CONVERSATION");
        assert_eq!(reply.action, ReplyAction::ClearTranscript);
    }

    #[test]
    fn test_help_preempts_domain_groups() {
        // "Help me understand ARGO data" matches both the meta rule and
        // the floats group; the meta rule is declared first and wins.
        let reply = respond("Help me understand ARGO data");
        assert!(reply.text.contains("Try asking"));
    }

    #[test]
    fn test_first_domain_group_wins() {
        let reply = respond("temperature and salinity in the Atlantic");
        assert!(reply.text.contains("thermocline"));
    }

    #[test]
    fn test_salinity_mentions_psu() {
        assert!(respond("Explain salinity variations").text.contains("PSU"));
    }

    #[test]
    fn test_fallback_is_total() {
        for input in ["", "xyzzy", "???", "tell me a joke"] {
            let reply = respond(input);
            assert_eq!(reply.text, FALLBACK);
            assert_eq!(reply.action, ReplyAction::Respond);
        }
    }

    #[test]
    fn test_idempotent() {
        let input = "How do ocean currents affect climate?";
        assert_eq!(respond(input), respond(input));
    }

    #[test]
    fn test_suggested_queries_all_resolve() {
        // The suggested queries from the chat sidebar; none may hit a
        // panic and each must produce non-empty text.
        let queries = [
            "What are ARGO floats?",
            "Show me temperature data for the Pacific Ocean",
            "How do ocean currents affect climate?",
            "What's the deepest ARGO measurement?",
            "Explain salinity variations",
            "Show recent data from the Atlantic",
            "What causes ocean acidification?",
            "How accurate are ARGO measurements?",
            "Compare temperature trends by region",
            "What is the thermohaline circulation?",
        ];
        for query in queries {
            assert!(!respond(query).text.is_empty(), "{query}");
        }
    }

    #[test]
    fn test_rule_table_is_well_formed() {
        for rule in RULES {
            assert!(!rule.response.is_empty());
            for trigger in rule.triggers {
                assert!(!trigger.is_empty());
                assert_eq!(*trigger, trigger.to_lowercase());
            }
        }
    }
}
