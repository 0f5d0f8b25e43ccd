use {
    crate::alloy::Healthcare,
    std::fmt::{self, Display, Formatter},
};

/// Permission class of a user as stored by the contract. On the wire it is a
/// `uint8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Role {
    None = 0,
    Patient = 1,
    Doctor = 2,
    Admin = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown role {0}, expected 0 (NONE), 1 (PATIENT), 2 (DOCTOR) or 3 (ADMIN)")]
pub struct UnknownRole(pub u8);

impl TryFrom<u8> for Role {
    type Error = UnknownRole;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Patient),
            2 => Ok(Self::Doctor),
            3 => Ok(Self::Admin),
            other => Err(UnknownRole(other)),
        }
    }
}

impl From<Role> for u8 {
    fn from(role: Role) -> Self {
        role as u8
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "NONE",
            Self::Patient => "PATIENT",
            Self::Doctor => "DOCTOR",
            Self::Admin => "ADMIN",
        })
    }
}

/// A user record as returned by `getUser`.
///
/// The role is kept as the raw on-chain value so that a record with an
/// out-of-range role can still be reported; [`UserRecord::role`] decodes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRecord {
    pub full_name: String,
    pub email: String,
    pub role: u8,
    pub verified: bool,
    /// IPFS content hash of the user's off-chain documents.
    pub content_hash: String,
}

impl UserRecord {
    pub fn role(&self) -> Result<Role, UnknownRole> {
        Role::try_from(self.role)
    }
}

impl From<Healthcare::getUserReturn> for UserRecord {
    fn from(value: Healthcare::getUserReturn) -> Self {
        Self {
            full_name: value.fullName,
            email: value.email,
            role: value.role,
            verified: value.isVerified,
            content_hash: value.ipfsHash,
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, rstest::rstest};

    #[rstest]
    #[case(0, Role::None, "NONE")]
    #[case(1, Role::Patient, "PATIENT")]
    #[case(2, Role::Doctor, "DOCTOR")]
    #[case(3, Role::Admin, "ADMIN")]
    fn decodes_known_roles(#[case] raw: u8, #[case] role: Role, #[case] label: &str) {
        assert_eq!(Role::try_from(raw), Ok(role));
        assert_eq!(role.to_string(), label);
        assert_eq!(u8::from(role), raw);
    }

    #[rstest]
    #[case(4)]
    #[case(42)]
    #[case(u8::MAX)]
    fn rejects_unknown_roles(#[case] raw: u8) {
        assert_eq!(Role::try_from(raw), Err(UnknownRole(raw)));
    }

    #[test]
    fn converts_get_user_return() {
        let record = UserRecord::from(Healthcare::getUserReturn {
            fullName: "Admin".to_string(),
            email: "admin@example.com".to_string(),
            role: 3,
            isVerified: true,
            ipfsHash: "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG".to_string(),
        });
        assert_eq!(record.full_name, "Admin");
        assert_eq!(record.email, "admin@example.com");
        assert_eq!(record.role(), Ok(Role::Admin));
        assert!(record.verified);
        assert_eq!(
            record.content_hash,
            "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG"
        );
    }

    #[test]
    fn out_of_range_role_is_kept_raw() {
        let record = UserRecord {
            role: 9,
            ..Default::default()
        };
        assert_eq!(record.role, 9);
        assert_eq!(record.role(), Err(UnknownRole(9)));
    }
}
