//! Hypermedia action lists stamped onto stored polls and votes.
//! They describe the deployment's published ports, not the record itself.

pub const POLL_LINKS: [&str; 8] = [
    "GET All Polls: 1090/polls/",
    "POST Poll: 1090/polls/:id",
    "DELETE All Polls: 1090/polls",
    "DELETE Poll: 1090/polls/:id",
    "GET All Votes: 1100/votes/",
    "POST Vote: 1100/votes/:id",
    "GET All Voters: 1080/voters/",
    "POST Voter: 1080/voters/:id",
];

pub const VOTE_LINKS: [&str; 8] = [
    "GET All Votes: 1100/votes/",
    "POST Vote: 1100/votes/:id",
    "DELETE All Votes: 1100/votes",
    "DELETE Vote: 1100/votes/:id",
    "GET All Voters: 1080/voters/",
    "POST Voter: 1080/voters/:id",
    "GET All Polls: 1090/polls/",
    "POST Poll: 1090/polls/:id",
];
