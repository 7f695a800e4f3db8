use serde_json::{Value, json};

pub fn example_response() -> Value {
    json!([{
        "word": "example",
        "phonetic": "/ɪɡˈzæmpəl/",
        "phonetics": [{
            "text": "/ɪɡˈzæmpəl/",
            "audio": "https://lex-audio.useremarkable.com/mp3/example_us_1.mp3"
        }],
        "meanings": [{
            "partOfSpeech": "noun",
            "definitions": [{
                "definition": "A representative form or pattern.",
                "synonyms": ["model", "pattern"],
                "example": "I tried to set an example."
            }]
        }]
    }])
}

/// Two parts of speech, no audio
pub fn coax_response() -> Value {
    json!([{
        "word": "coax",
        "phonetic": "/kəʊks/",
        "phonetics": [{"text": "/kəʊks/", "audio": ""}],
        "meanings": [
            {
                "partOfSpeech": "verb",
                "definitions": [
                    {
                        "definition": "Persuade (someone) gradually or by flattery to do something.",
                        "synonyms": ["persuade", "cajole"],
                        "example": "The trainees were coaxed into doing boring jobs."
                    },
                    {
                        "definition": "Manipulate (something) carefully into a particular situation or position.",
                        "synonyms": [],
                        "example": "I watched him coax the last bit of toothpaste onto his brush."
                    }
                ]
            },
            {
                "partOfSpeech": "adjective",
                "definitions": [{
                    "definition": "Pretended; feigned.",
                    "example": "He had a coax smile."
                }]
            }
        ]
    }])
}
