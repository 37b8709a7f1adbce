use super::*;

#[test]
fn test_parse_choice() {
    assert_eq!(parse_choice("s"), Some(DialogButton::Ok));
    assert_eq!(parse_choice(" Save "), Some(DialogButton::Ok));
    assert_eq!(parse_choice("d"), Some(DialogButton::DontSave));
    assert_eq!(parse_choice("no"), Some(DialogButton::DontSave));
    assert_eq!(parse_choice("C"), Some(DialogButton::Cancel));
    assert_eq!(parse_choice("maybe"), None);
    assert_eq!(parse_choice(""), None);
}
