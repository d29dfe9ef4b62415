use crate::domain::model::{BirthdayValue, ZodiacSign};

/// (month, cutover day, sign up to and including the cutover, sign after it)
pub const ZODIAC_BOUNDARIES: [(u8, u8, ZodiacSign, ZodiacSign); 12] = [
    (1, 19, ZodiacSign::Capricorn, ZodiacSign::Aquarius),
    (2, 18, ZodiacSign::Aquarius, ZodiacSign::Pisces),
    (3, 20, ZodiacSign::Pisces, ZodiacSign::Aries),
    (4, 19, ZodiacSign::Aries, ZodiacSign::Taurus),
    (5, 20, ZodiacSign::Taurus, ZodiacSign::Gemini),
    (6, 20, ZodiacSign::Gemini, ZodiacSign::Cancer),
    (7, 22, ZodiacSign::Cancer, ZodiacSign::Leo),
    (8, 22, ZodiacSign::Leo, ZodiacSign::Virgo),
    (9, 22, ZodiacSign::Virgo, ZodiacSign::Libra),
    (10, 22, ZodiacSign::Libra, ZodiacSign::Scorpio),
    (11, 21, ZodiacSign::Scorpio, ZodiacSign::Sagittarius),
    (12, 21, ZodiacSign::Sagittarius, ZodiacSign::Capricorn),
];

/// Western tropical zodiac sign for a birthday.
pub fn classify(birthday: BirthdayValue) -> ZodiacSign {
    // BirthdayValue 保證月份 1-12，所以一定找得到
    let (_, cutover, before, after) = ZODIAC_BOUNDARIES[usize::from(birthday.month()) - 1];
    if birthday.day() <= cutover {
        before
    } else {
        after
    }
}
