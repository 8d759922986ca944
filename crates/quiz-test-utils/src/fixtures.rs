//! Option payloads and attachments used across tests

use quiz_engine::{Attachments, NewQuestion};

/// A few bytes standing in for an encoded image
pub const PNG: &[u8] = b"\x89PNG\r\n\x1a\n";

/// Attachments holding [`PNG`] under every given name
pub fn attachments(names: &[&str]) -> Attachments {
    let mut attachments = Attachments::new();
    for name in names {
        attachments.insert_bytes(*name, PNG.to_vec());
    }
    attachments
}

/// `ORDERING` with one image on the first item
pub fn ordering() -> NewQuestion {
    NewQuestion::new(
        "ORDERING",
        "Sort by size",
        r#"{"sortingType":"LEAST_TO_MOST","options":[{"text":"Left","imageName":"imgA"},{"text":"Right"}]}"#,
    )
}

/// `MULTIPLE_CH` without `multipleAnswer`
pub fn multiple_choice() -> NewQuestion {
    NewQuestion::new(
        "MULTIPLE_CH",
        "Pick the planet",
        r#"{"options":[{"text":"Mars","imageName":"mars"},{"text":"Moon"}]}"#,
    )
}

/// `MATCHING` with two images on the left and one on the right
pub fn matching() -> NewQuestion {
    NewQuestion::new(
        "MATCHING",
        "Match flags to countries",
        r#"{"options1":[{"text":"France","imageName":"fr"},{"text":"Japan","imageName":"jp"},{"text":"Peru"}],"options2":[{"text":"Red sun","imageName":"sun"},{"text":"Tricolour"},{"text":"Red-white"}]}"#,
    )
}

/// `DRAG_AND_DROP` with an image in each sequence
pub fn drag_and_drop() -> NewQuestion {
    NewQuestion::new(
        "DRAG_AND_DROP",
        "Sort the animals",
        r#"{"boxes":[{"text":"Mammals","imageName":"box"},{"text":"Birds"}],"options":[{"text":"Cat"},{"text":"Owl","imageName":"owl"}]}"#,
    )
}

/// `OPEN` expecting two answers
pub fn open() -> NewQuestion {
    NewQuestion::new("OPEN", "Name two oceans", r#"{"numAnswers":2}"#)
}
