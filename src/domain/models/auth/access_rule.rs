use super::AuthenticatedIdentity;

/// 보호된 스코프가 요구하는 접근 조건
#[derive(Debug, Clone, PartialEq)]
pub enum AccessRule {
    /// 인증만 되어 있으면 허용
    Authenticated,
    /// 특정 역할이 필요 (`ROLE_ADMIN` 등)
    Role(String),
}

impl AccessRule {
    /// 인증된 사용자가 조건을 만족하는지 확인
    pub fn is_satisfied(&self, principal: &AuthenticatedIdentity) -> bool {
        match self {
            AccessRule::Authenticated => true,
            AccessRule::Role(required) => principal.has_role(required),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(role: &str) -> AuthenticatedIdentity {
        AuthenticatedIdentity {
            identity_id: 1,
            role: role.to_string(),
        }
    }

    #[test]
    fn test_access_rule_matching() {
        assert!(AccessRule::Authenticated.is_satisfied(&principal("ROLE_NORMAL")));
        assert!(AccessRule::Role("ROLE_ADMIN".to_string()).is_satisfied(&principal("ROLE_ADMIN")));
        assert!(!AccessRule::Role("ROLE_ADMIN".to_string()).is_satisfied(&principal("ROLE_NORMAL")));
        assert!(!AccessRule::Role("ROLE_ADMIN".to_string()).is_satisfied(&principal("role_admin")));
    }
}
