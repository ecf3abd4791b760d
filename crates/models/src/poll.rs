use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId};
use crate::links::POLL_LINKS;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOption {
    #[serde(rename = "PollOptionID", alias = "OptionID")]
    pub option_id: EntityId,
    #[serde(rename = "PollOptionText", alias = "OptionText", default)]
    pub option_text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    #[serde(rename = "PollID")]
    pub poll_id: EntityId,
    #[serde(rename = "PollTitle", default)]
    pub poll_title: String,
    #[serde(rename = "PollQuestion", default)]
    pub poll_question: String,
    #[serde(rename = "PollOptions", default)]
    pub poll_options: Vec<PollOption>,
    #[serde(rename = "Links", default)]
    pub links: Vec<String>,
}

impl Poll {
    pub fn new(poll_id: EntityId, title: &str, question: &str) -> Self {
        Self {
            poll_id,
            poll_title: title.to_string(),
            poll_question: question.to_string(),
            poll_options: Vec::new(),
            links: Vec::new(),
        }
    }
}

impl Entity for Poll {
    const NAMESPACE: &'static str = "polls";
    const LABEL: &'static str = "poll";

    fn id(&self) -> EntityId {
        self.poll_id
    }

    fn attach_links(&mut self) {
        self.links = POLL_LINKS.iter().map(|s| s.to_string()).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::decode;

    #[test]
    fn attach_links_replaces_client_links() {
        let mut poll: Poll = decode(
            r#"{"PollID":5,"PollTitle":"Lunch","Links":["bogus"],
                "PollOptions":[{"OptionID":1,"OptionText":"Tacos"}]}"#,
        )
        .unwrap();
        assert_eq!(poll.poll_options[0].option_text, "Tacos");

        poll.attach_links();
        assert_eq!(poll.links.len(), POLL_LINKS.len());
        assert_eq!(poll.links[0], "GET All Polls: 1090/polls/");
        assert!(!poll.links.iter().any(|l| l == "bogus"));
    }
}
