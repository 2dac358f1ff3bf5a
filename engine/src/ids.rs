pub const ID_ALPHABET: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

const SESSION_ID_LENGTH: usize = 24;

pub fn new_session_id() -> String {
    nanoid::nanoid!(SESSION_ID_LENGTH, &ID_ALPHABET)
}
