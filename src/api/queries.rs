//! GraphQL documents sent to the CRM API.

pub const LOGIN_MUTATION: &str = r#"
mutation Login($email: String!) {
  login(loginInput: { email: $email }) {
    accessToken
  }
}
"#;

/// Identity probe: only checks that the credential is accepted.
pub const ME_PROBE_QUERY: &str = r#"
query Me {
  me {
    name
  }
}
"#;

pub const ME_QUERY: &str = r#"
query Me {
  me {
    id
    name
    email
    phone
    jobTitle
    timezone
    avatarUrl
  }
}
"#;

pub const COMPANIES_LIST_QUERY: &str = r#"
query CompaniesList($filter: CompanyFilter!, $sorting: [CompanySort!], $paging: OffsetPaging!) {
  companies(filter: $filter, sorting: $sorting, paging: $paging) {
    totalCount
    nodes {
      id
      name
      avatarUrl
      salesOwner {
        id
        name
        avatarUrl
      }
    }
  }
}
"#;

pub const CREATE_COMPANY_MUTATION: &str = r#"
mutation CreateCompany($input: CreateOneCompanyInput!) {
  createOneCompany(input: $input) {
    id
    name
    avatarUrl
    salesOwner {
      id
      name
      avatarUrl
    }
  }
}
"#;

pub const USERS_SELECT_QUERY: &str = r#"
query UsersSelect($filter: UserFilter!, $sorting: [UserSort!], $paging: OffsetPaging!) {
  users(filter: $filter, sorting: $sorting, paging: $paging) {
    totalCount
    nodes {
      id
      name
      avatarUrl
    }
  }
}
"#;

pub const TASKS_QUERY: &str = r#"
query Tasks($filter: TaskFilter!, $sorting: [TaskSort!], $paging: OffsetPaging!) {
  tasks(filter: $filter, sorting: $sorting, paging: $paging) {
    totalCount
    nodes {
      id
      title
      description
      dueDate
      completed
      stageId
      stage {
        id
        title
      }
      users {
        id
        name
        avatarUrl
      }
      createdAt
      updatedAt
    }
  }
}
"#;
