//! Permission strings and `chmod` mode arithmetic.

use linsim_types::error::{Result, SimError};

const SETUID: u32 = 0o4000;
const SETGID: u32 = 0o2000;
const STICKY: u32 = 0o1000;

/// Parse a ten-character mode string (`drwxr-xr-t`) into permission bits.
///
/// The leading type character is ignored. Unknown characters count as unset.
pub fn parse_permissions(perm: &str) -> u32 {
    let chars: Vec<char> = perm.chars().collect();
    let mut bits = 0u32;
    for (shift, offset) in [(6u32, 1usize), (3, 4), (0, 7)] {
        let slot = |i: usize| chars.get(offset + i).copied().unwrap_or('-');
        if slot(0) == 'r' {
            bits |= 4 << shift;
        }
        if slot(1) == 'w' {
            bits |= 2 << shift;
        }
        let special = match shift {
            6 => SETUID,
            3 => SETGID,
            _ => STICKY,
        };
        match slot(2) {
            'x' => bits |= 1 << shift,
            's' | 't' => bits |= (1 << shift) | special,
            'S' | 'T' => bits |= special,
            _ => {},
        }
    }
    bits
}

/// Render permission bits back into a mode string with the given type
/// character (`d` or `-`).
pub fn format_mode(kind: char, bits: u32) -> String {
    let mut out = String::with_capacity(10);
    out.push(kind);
    for (shift, special, set_exec, unset_exec) in [
        (6u32, SETUID, 's', 'S'),
        (3, SETGID, 's', 'S'),
        (0, STICKY, 't', 'T'),
    ] {
        let triple = (bits >> shift) & 7;
        out.push(if triple & 4 != 0 { 'r' } else { '-' });
        out.push(if triple & 2 != 0 { 'w' } else { '-' });
        let exec = triple & 1 != 0;
        out.push(match (bits & special != 0, exec) {
            (true, true) => set_exec,
            (true, false) => unset_exec,
            (false, true) => 'x',
            (false, false) => '-',
        });
    }
    out
}

/// Apply a `chmod` mode argument to the current bits.
///
/// Accepts octal (`755`, `0644`) or comma-separated symbolic clauses
/// (`u+x`, `go-w`, `a=r`, `u+x-w`). An empty who-list means `a`.
pub fn apply_mode(mode: &str, current: u32) -> Result<u32> {
    let invalid = || SimError::InvalidArgument(format!("invalid mode: '{mode}'"));

    if mode.is_empty() {
        return Err(invalid());
    }
    if mode.chars().all(|c| c.is_digit(8)) {
        if mode.len() > 4 {
            return Err(invalid());
        }
        return u32::from_str_radix(mode, 8).map_err(|_| invalid());
    }

    let mut bits = current & 0o7777;
    for clause in mode.split(',') {
        let mut chars = clause.chars().peekable();

        let mut who = 0u32;
        while let Some(&c) = chars.peek() {
            let mask = match c {
                'u' => 0o4700,
                'g' => 0o2070,
                'o' => 0o1007,
                'a' => 0o7777,
                _ => break,
            };
            who |= mask;
            chars.next();
        }
        if who == 0 {
            who = 0o7777;
        }

        let mut saw_op = false;
        while let Some(op) = chars.next() {
            if !matches!(op, '+' | '-' | '=') {
                return Err(invalid());
            }
            saw_op = true;

            let mut perms = 0u32;
            while let Some(&c) = chars.peek() {
                let p = match c {
                    'r' => 0o444,
                    'w' => 0o222,
                    'x' => 0o111,
                    's' => SETUID | SETGID,
                    't' => STICKY,
                    _ => break,
                };
                perms |= p;
                chars.next();
            }
            let effective = perms & who;
            match op {
                '+' => bits |= effective,
                '-' => bits &= !effective,
                _ => bits = (bits & !(who & 0o777)) | effective,
            }
        }
        if !saw_op {
            return Err(invalid());
        }
    }
    Ok(bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_common_modes() {
        assert_eq!(parse_permissions("drwxr-xr-x"), 0o755);
        assert_eq!(parse_permissions("-rw-r--r--"), 0o644);
        assert_eq!(parse_permissions("drwx------"), 0o700);
        assert_eq!(parse_permissions("dr-xr-xr-x"), 0o555);
    }

    #[test]
    fn parse_sticky() {
        assert_eq!(parse_permissions("drwxrwxrwt"), 0o1777);
    }

    #[test]
    fn format_round_trips_seed_modes() {
        for s in ["drwxr-xr-x", "-rw-r--r--", "drwxrwxrwt", "-rwxr-xr-x", "drwx------"] {
            let kind = s.chars().next().unwrap();
            assert_eq!(format_mode(kind, parse_permissions(s)), s);
        }
    }

    #[test]
    fn octal_modes() {
        assert_eq!(apply_mode("755", 0).unwrap(), 0o755);
        assert_eq!(apply_mode("0644", 0o777).unwrap(), 0o644);
        assert_eq!(apply_mode("1777", 0).unwrap(), 0o1777);
    }

    #[test]
    fn symbolic_modes() {
        assert_eq!(apply_mode("u+x", 0o644).unwrap(), 0o744);
        assert_eq!(apply_mode("a+x", 0o644).unwrap(), 0o755);
        assert_eq!(apply_mode("+x", 0o644).unwrap(), 0o755);
        assert_eq!(apply_mode("g-w", 0o664).unwrap(), 0o644);
        assert_eq!(apply_mode("u=rwx", 0o644).unwrap(), 0o744);
        assert_eq!(apply_mode("go-rwx", 0o755).unwrap(), 0o700);
        assert_eq!(apply_mode("u+x,g+w", 0o644).unwrap(), 0o764);
        assert_eq!(apply_mode("u+x-w", 0o644).unwrap(), 0o544);
    }

    #[test]
    fn invalid_modes() {
        assert!(apply_mode("", 0o644).is_err());
        assert!(apply_mode("xyz", 0o644).is_err());
        assert!(apply_mode("u", 0o644).is_err());
        assert!(apply_mode("77777", 0o644).is_err());
        assert!(apply_mode("u+q", 0o644).is_err());
    }

    #[test]
    fn invalid_mode_message() {
        let err = apply_mode("xyz", 0).unwrap_err();
        assert_eq!(err.to_string(), "invalid mode: 'xyz'");
    }
}
