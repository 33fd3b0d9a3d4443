use super::*;

#[test]
fn empty_or_fully_dropped_description_is_rejected() {
    let err = Character::from_description("").unwrap_err();
    assert!(err.to_string().contains("no stroke data available"));

    assert!(Character::from_description("9NO:1,1#xx").is_err());
}

#[test]
fn reveal_flags_track_and_reset() {
    let mut ch = Character::from_description("1NO:0,0,10,0#3NO:5,0,5,20#5PR:20,4,2,4").unwrap();
    assert_eq!(ch.len(), 3);
    assert_eq!(ch.revealed_count(), 0);

    ch.mark_revealed(0);
    ch.mark_revealed(2);
    ch.mark_revealed(7);
    assert_eq!(ch.revealed_count(), 2);
    assert!(ch.stroke(0).unwrap().revealed());
    assert!(!ch.stroke(1).unwrap().revealed());

    ch.reset_revealed();
    assert_eq!(ch.revealed_count(), 0);
}

#[test]
fn from_strokes_clears_stale_flags() {
    let mut ch = Character::from_description("1NO:0,0,10,0").unwrap();
    ch.mark_revealed(0);
    let rebuilt = Character::from_strokes(ch.strokes().to_vec()).unwrap();
    assert_eq!(rebuilt.revealed_count(), 0);
}
