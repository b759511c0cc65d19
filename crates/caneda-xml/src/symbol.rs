use quick_xml::events::Event;
use quick_xml::Reader;

/// Extracts the text of the embedded `symbol` element from a persisted
/// document without parsing anything else.
///
/// A single forward scan over the events; the first `symbol` start tag
/// wins. Returns the empty string when the element is absent, empty, or
/// the input is not readable as XML. Never an error: callers treat "no
/// symbol" and "unreadable" identically.
pub fn extract_embedded_symbol(xml: &str) -> String {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) if start.name().as_ref() == b"symbol" => {
                let Ok(raw) = reader.read_text(start.name()) else {
                    return String::new();
                };
                return match quick_xml::escape::unescape(&raw) {
                    Ok(text) => text.into_owned(),
                    Err(_) => String::new(),
                };
            }
            Ok(Event::Eof) => return String::new(),
            Ok(_) => {}
            Err(_) => return String::new(),
        }
    }
}
