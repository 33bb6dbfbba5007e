use serde::Serialize;

pub const MAX_GROUPS_PER_TOPIC: usize = 3;

pub const TOPICS: [&str; 10] = [
    "Topic 1 : I/O Hardware, Port, Bus, Controller, Bus Architecture",
    "Topic 2 : Polling, Interrupts, I/O Requests to Hardware Operations, Interrupt Driven I/O Cycle, Life Cycle of IO request",
    "Topic 3 : Direct Memory Access, Applications of IO interface",
    "Topic 4 : Kernel I/O Structure, Characteristics of I/O Devices",
    "Topic 5 : Kernel I/O Subsystem, Error Handling, I/O Protection",
    "Topic 6 : Use of a System Call to Perform I/O, Kernel Data Structures, UNIX I/O Kernel Structure",
    "Topic 7 : The Security Problem, Security Violation Categories, Security Violation Methods",
    "Topic 8 : Security Measure Levels, Program Threats, System and Network Threats (Cont.)",
    "Topic 9 : Cryptography as a Security Tool, Secure Communication over Insecure Medium, User Authentication, Passwords",
    "Topic 10 : Implementing Security Defenses, Firewalling to Protect Systems and Networks, Network Security Through Domain Separation Via Firewall",
];

/// The fixed list of topics groups can register under, and how many groups each one takes.
/// Shared by admission and the availability report so both always agree.
#[derive(Debug, Clone)]
pub struct TopicCatalog {
    topics: Vec<String>,
    capacity: usize,
}

impl TopicCatalog {
    pub fn new(topics: Vec<String>, capacity: usize) -> Self {
        TopicCatalog { topics, capacity }
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn contains(&self, topic: &str) -> bool {
        self.topics.iter().any(|t| t == topic)
    }
}

impl Default for TopicCatalog {
    fn default() -> Self {
        TopicCatalog::new(
            TOPICS.iter().map(|t| t.to_string()).collect(),
            MAX_GROUPS_PER_TOPIC,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicAvailability {
    pub topic: String,
    pub available_slots: usize,
}
