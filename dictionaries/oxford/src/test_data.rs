use serde_json::{Value, json};

/// Trimmed `entries/en-us/example` response
pub fn example_response() -> Value {
    json!({
        "id": "example",
        "metadata": {"provider": "Oxford University Press"},
        "results": [{
            "id": "example",
            "language": "en-us",
            "type": "headword",
            "word": "example",
            "lexicalEntries": [
                {
                    "language": "en-us",
                    "lexicalCategory": {"id": "noun", "text": "Noun"},
                    "text": "example",
                    "entries": [{
                        "pronunciations": [
                            {
                                "dialects": ["American English"],
                                "phoneticNotation": "respell",
                                "phoneticSpelling": "ig-ˈzam-pəl"
                            },
                            {
                                "audioFile": "https://audio.oxforddictionaries.com/en/mp3/example__us_1.mp3",
                                "dialects": ["American English"],
                                "phoneticNotation": "IPA",
                                "phoneticSpelling": "ɪɡˈzæmpəl"
                            }
                        ],
                        "senses": [
                            {
                                "definitions": [
                                    "a thing characteristic of its kind or illustrating a general rule"
                                ],
                                "examples": [
                                    {"text": "it's a good example of how European action can produce results"},
                                    {"text": "some of these carpets are among the finest examples of the period"}
                                ],
                                "synonyms": [
                                    {"language": "en", "text": "specimen"},
                                    {"language": "en", "text": "sample"},
                                    {"language": "fr", "text": "exemple"},
                                    {"language": "en"}
                                ]
                            },
                            {
                                "definitions": [
                                    "a person or thing regarded in terms of their fitness to be imitated"
                                ],
                                "examples": [
                                    {"text": "it is vitally important that parents should set an example"}
                                ],
                                "synonyms": [
                                    {"language": "en", "text": "precedent"},
                                    {"language": "en", "text": "lead"},
                                    {"language": "en", "text": "lead"}
                                ]
                            }
                        ]
                    }]
                },
                {
                    "language": "en-us",
                    "lexicalCategory": {"id": "verb", "text": "Verb"},
                    "text": "example",
                    "entries": [{
                        "senses": [{
                            "definitions": ["be illustrated or exemplified"],
                            "examples": [
                                {"text": "the extent of Allied naval support is exampled by the navigational specialists provided"}
                            ]
                        }]
                    }]
                }
            ]
        }]
    })
}
