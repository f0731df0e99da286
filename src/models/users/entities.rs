use serde::{Deserialize, Serialize};

// 用户角色
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Employee,   // 员工
    TeamLead,   // 组长
    DeptHead,   // 部门负责人（室长）
    CenterHead, // 中心/研究所负责人
    Admin,      // 人事管理员
}

impl UserRole {
    pub const EMPLOYEE: &'static str = "employee";
    pub const TEAM_LEAD: &'static str = "team_lead";
    pub const DEPT_HEAD: &'static str = "dept_head";
    pub const CENTER_HEAD: &'static str = "center_head";
    pub const ADMIN: &'static str = "admin";

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Employee => Self::EMPLOYEE,
            UserRole::TeamLead => Self::TEAM_LEAD,
            UserRole::DeptHead => Self::DEPT_HEAD,
            UserRole::CenterHead => Self::CENTER_HEAD,
            UserRole::Admin => Self::ADMIN,
        }
    }

    pub fn all_roles() -> &'static [UserRole] {
        &[
            UserRole::Employee,
            UserRole::TeamLead,
            UserRole::DeptHead,
            UserRole::CenterHead,
            UserRole::Admin,
        ]
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<UserRole>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的用户角色: '{s}'. 支持的角色: employee, team_lead, dept_head, center_head, admin"
            ))
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            UserRole::EMPLOYEE => Ok(UserRole::Employee),
            UserRole::TEAM_LEAD => Ok(UserRole::TeamLead),
            UserRole::DEPT_HEAD => Ok(UserRole::DeptHead),
            UserRole::CENTER_HEAD => Ok(UserRole::CenterHead),
            UserRole::ADMIN => Ok(UserRole::Admin),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 用户实体（评估引擎只读）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub full_name: Option<String>,
    pub role: UserRole,
    pub organization_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_its_token() {
        for role in UserRole::all_roles() {
            assert_eq!(role.as_str().parse::<UserRole>(), Ok(*role));
        }
        assert!("manager".parse::<UserRole>().is_err());
    }

    #[test]
    fn role_deserializes_from_snake_case() {
        let role: UserRole = serde_json::from_str("\"dept_head\"").unwrap();
        assert_eq!(role, UserRole::DeptHead);
        assert!(serde_json::from_str::<UserRole>("\"boss\"").is_err());
    }
}
