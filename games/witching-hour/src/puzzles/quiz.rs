//! The aptitude quiz: ten fixed questions with typed answers.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub id: u32,
    pub prompt: &'static str,
    pub answer: &'static str,
}

pub const QUESTIONS: [Question; 10] = [
    Question {
        id: 1,
        prompt: "Python Coding:\nx = 2\nfor i in range(5):\n    x *= 2\nprint(x)\nWhat number echoes from the void?",
        answer: "64",
    },
    Question {
        id: 2,
        prompt: "If the cost of 5 pens and 3 pencils is $21, and the cost of 2 pens and 1 pencil is $7, what is the cost of 1 pen?",
        answer: "2",
    },
    Question {
        id: 3,
        prompt: "A train 120m long is running at a speed of 60 km/h. In how many seconds will it pass a man standing on the platform?",
        answer: "7.2",
    },
    Question {
        id: 4,
        prompt: "If 3 typists can type 3 pages in 3 minutes, how many typists will it take to type 18 pages in 6 minutes?",
        answer: "6",
    },
    Question {
        id: 5,
        prompt: "A bag contains 6 red, 4 blue, and 5 green balls. What is the minimum number of balls you need to pick to be sure of getting at least 2 balls of the same color?",
        answer: "4",
    },
    Question {
        id: 6,
        prompt: "In a class of 60 students, 30 study English, 25 study Maths, and 10 study both. How many students study neither?",
        answer: "15",
    },
    Question {
        id: 7,
        prompt: "A man buys an article for $240 and sells it at a 20% profit. He then sells another article for $180 at 10% loss. What is his overall profit or loss?",
        answer: "20",
    },
    Question {
        id: 8,
        prompt: "Find the next number in the series: 2, 6, 12, 20, 30, ?",
        answer: "42",
    },
    Question {
        id: 9,
        prompt: "A cube has side length 4 cm. How many smaller cubes of side 1 cm can be formed from it?",
        answer: "64",
    },
    Question {
        id: 10,
        prompt: "If a clock is set right at 6 AM, in how many minutes will it gain 12 minutes?",
        answer: "720",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizResult {
    pub score: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Default)]
pub struct Quiz {
    answers: BTreeMap<u32, String>,
    result: Option<QuizResult>,
}

impl Quiz {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest text typed for question `id`. Returns false for
    /// unknown ids or once the quiz has been submitted.
    pub fn answer(&mut self, id: u32, text: &str) -> bool {
        if self.result.is_some() || !QUESTIONS.iter().any(|q| q.id == id) {
            return false;
        }
        self.answers.insert(id, text.to_string());
        true
    }

    pub fn answer_for(&self, id: u32) -> Option<&str> {
        self.answers.get(&id).map(String::as_str)
    }

    /// Score the answers. Only the first call counts.
    pub fn submit(&mut self) -> Option<QuizResult> {
        if self.result.is_some() {
            return None;
        }
        let score = QUESTIONS
            .iter()
            .filter(|q| {
                self.answers
                    .get(&q.id)
                    .is_some_and(|text| text.trim().to_lowercase() == q.answer.to_lowercase())
            })
            .count() as u32;
        let result = QuizResult { score, total: QUESTIONS.len() as u32 };
        self.result = Some(result);
        Some(result)
    }

    pub fn result(&self) -> Option<QuizResult> {
        self.result
    }

    pub fn is_submitted(&self) -> bool {
        self.result.is_some()
    }
}
